use std::io::Write;

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use kod_app_core::app_core::{AppCommand, AppStore};
use kod_app_core::domain::AppState;
use kod_app_core::kernel::AppKernel;
use kod_app_core::ports::EventsRenderer;
use kod_app_core::viewmodel::{events_page_vm, timeline_vm, EventsPageVm, TimelineVm};
use kod_core::contact::{ContactError, ContactSubmission, OutgoingMail};
use kod_core::{FilterChange, Locale, LocalizedPair, Message};
use kod_infra::SiteSource;
use serde::Serialize;
use tracing::info;

use crate::render::LastUrl;

/// Filter edits to apply, in order, once the catalog is loaded.
#[derive(Debug, Clone, Default)]
pub struct EventsRequest {
    /// Site base URL or a local directory laid out like the site root.
    pub site: String,
    /// Page path plus optional query, e.g. `/en/events?year=2025`.
    pub location: String,
    pub clear: bool,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub venue: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EventsOutcome {
    pub page: EventsPageVm,
    /// URL the page would show after the last change; `None` if never ready.
    pub url: Option<String>,
}

impl EventsOutcome {
    pub fn failed(&self) -> bool {
        matches!(
            self.page.status,
            kod_app_core::viewmodel::EventsStatusVm::Failed { .. }
        )
    }
}

/// Accepts an option by canonical key or by its Turkish label, ignoring case.
/// Unknown input is passed through unchanged and simply matches nothing.
fn resolve_option(pairs: &[LocalizedPair], input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let wanted = input.to_lowercase();
    let found = pairs
        .iter()
        .find(|p| p.key().to_lowercase() == wanted || p.tr.to_lowercase() == wanted);
    Some(found.map_or_else(|| input.to_string(), |p| p.key().to_string()))
}

fn open_kernel(
    site: &str,
    location: &str,
) -> anyhow::Result<(AppKernel<SiteSource, LastUrl>, AppStore, LastUrl)> {
    let source = SiteSource::from_location(site).context("Failed to open site")?;
    let store = AppStore::new(AppState::from_location(location));
    let history = LastUrl::default();
    let kernel = AppKernel::new(store.clone(), source, history.clone())?;
    Ok((kernel, store, history))
}

pub async fn cmd_events(
    req: EventsRequest,
    renderer: &mut dyn EventsRenderer,
) -> anyhow::Result<EventsOutcome> {
    let (mut kernel, store, history) = open_kernel(&req.site, &req.location)?;

    kernel.dispatch(AppCommand::LoadCatalog);
    while store.with_state(|s| s.boot.is_loading()) {
        kernel.settle().await;
    }

    if store.with_state(|s| s.boot.is_ready()) {
        let (genres, venues) = store.with_state(|s| {
            s.engine
                .catalog()
                .map(|c| (c.meta.genres.clone(), c.meta.venues.clone()))
                .unwrap_or_default()
        });

        if req.clear {
            kernel.dispatch(AppCommand::ClearFilters);
        }
        if let Some(artist) = req.artist {
            kernel.dispatch(AppCommand::ChangeFilter(FilterChange::Artist(artist)));
        }
        if let Some(genre) = req.genre {
            let genre = resolve_option(&genres, &genre);
            kernel.dispatch(AppCommand::ChangeFilter(FilterChange::Genre(genre)));
        }
        if let Some(year) = req.year {
            kernel.dispatch(AppCommand::ChangeFilter(FilterChange::Year(Some(year))));
        }
        if let Some(venue) = req.venue {
            let venue = resolve_option(&venues, &venue);
            kernel.dispatch(AppCommand::ChangeFilter(FilterChange::Venue(venue)));
        }
    }

    let page = store.with_state(events_page_vm);
    renderer.render_events(&page)?;
    info!("{} events shown", page.result_count);

    Ok(EventsOutcome {
        page,
        url: history.get(),
    })
}

pub async fn cmd_upcoming(
    site: &str,
    location: &str,
    today: NaiveDate,
    renderer: &mut dyn EventsRenderer,
) -> anyhow::Result<TimelineVm> {
    let (mut kernel, store, _history) = open_kernel(site, location)?;

    kernel.dispatch(AppCommand::LoadTimeline { today });
    kernel.settle().await;

    let vm = store.with_state(timeline_vm);
    renderer.render_timeline(&vm)?;
    Ok(vm)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum ContactOutcome {
    Composed { mail: OutgoingMail },
    Rejected { errors: Vec<String> },
}

/// Validates a submission and prints the message that would be sent.
/// The locale comes from the referring page, as on the site.
pub fn cmd_contact(
    submission: &ContactSubmission,
    referer: Option<&str>,
    sent_at: NaiveDateTime,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<ContactOutcome> {
    let locale = referer.map(Locale::from_referer).unwrap_or_default();

    let outcome = match submission.validate() {
        Ok(valid) => ContactOutcome::Composed {
            mail: valid.compose(locale, referer, sent_at),
        },
        Err(errors) => ContactOutcome::Rejected {
            errors: errors
                .into_iter()
                .map(|e: ContactError| e.message(locale).to_string())
                .collect(),
        },
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &outcome)?;
        writeln!(out)?;
        return Ok(outcome);
    }

    match &outcome {
        ContactOutcome::Composed { mail } => {
            writeln!(out, "To: {}", mail.to)?;
            writeln!(out, "From: {}", mail.from)?;
            writeln!(out, "Reply-To: {}", mail.reply_to)?;
            writeln!(out, "Subject: {}", mail.subject)?;
            writeln!(out)?;
            write!(out, "{}", mail.body)?;
        }
        ContactOutcome::Rejected { errors } => {
            writeln!(out, "{}", Message::ContactErrorTitle.text(locale))?;
            for e in errors {
                writeln!(out, "  - {e}")?;
            }
            writeln!(out, "{}", Message::GoBack.text(locale))?;
        }
    }
    Ok(outcome)
}
