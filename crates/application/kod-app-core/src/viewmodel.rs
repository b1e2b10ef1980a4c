use kod_config::LONG_TITLE_CHARS;
use kod_core::i18n::{format_long_date, format_short_date};
use kod_core::timeline::FutureEvent;
use kod_core::{Dimension, Event, FilterEngine, Locale, LocalizedPair, Message};
use serde::Serialize;

use crate::domain::{AppState, BootState, TimelineState};

// --- Events page ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptionVm {
    /// Canonical value; empty for the "All" entry.
    pub value: String,
    pub label: String,
    pub enabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelectVm {
    pub dimension: Dimension,
    pub title: String,
    /// Label of the selected option, the "All" label when nothing is selected.
    pub selected_label: String,
    pub options: Vec<FilterOptionVm>,
    pub interactive: bool,
}

impl FilterSelectVm {
    pub fn selected(&self) -> Option<&FilterOptionVm> {
        self.options.iter().find(|o| o.selected && !o.value.is_empty())
    }

    pub fn option(&self, value: &str) -> Option<&FilterOptionVm> {
        self.options.iter().find(|o| o.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCardVm {
    pub series: Option<String>,
    pub artist: String,
    pub long_title: bool,
    pub date_label: String,
    pub date: String,
    pub venue_label: String,
    pub venue: String,
    pub genre_label: String,
    pub genre: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EventsStatusVm {
    Loading { message: String },
    Failed { message: String },
    Empty { message: String },
    Results { cards: Vec<EventCardVm> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLabelsVm {
    pub artist: String,
    pub search_placeholder: String,
    pub series: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventsPageVm {
    pub locale: Locale,
    pub labels: PageLabelsVm,
    pub artist_query: String,
    pub genre: FilterSelectVm,
    pub year: FilterSelectVm,
    pub venue: FilterSelectVm,
    pub clear_label: String,
    pub total_label: String,
    pub result_count: usize,
    pub status: EventsStatusVm,
}

fn all_option(locale: Locale, nothing_selected: bool) -> FilterOptionVm {
    FilterOptionVm {
        value: String::new(),
        label: Message::All.text(locale).to_string(),
        enabled: true,
        selected: nothing_selected,
    }
}

fn pair_options<'a>(
    pairs: impl IntoIterator<Item = &'a LocalizedPair>,
    dim: Dimension,
    engine: &FilterEngine,
    selected: Option<&str>,
    locale: Locale,
) -> Vec<FilterOptionVm> {
    let available = &engine.view().available;
    pairs
        .into_iter()
        .map(|pair| FilterOptionVm {
            value: pair.key().to_string(),
            label: pair.label(locale).to_string(),
            enabled: available.is_enabled(dim, pair.key()),
            selected: selected == Some(pair.key()),
        })
        .collect()
}

fn select_vm(
    dim: Dimension,
    title: Message,
    mut options: Vec<FilterOptionVm>,
    locale: Locale,
    interactive: bool,
) -> FilterSelectVm {
    let nothing_selected = !options.iter().any(|o| o.selected);
    options.insert(0, all_option(locale, nothing_selected));
    let selected_label = options
        .iter()
        .find(|o| o.selected)
        .map(|o| o.label.clone())
        .unwrap_or_default();
    FilterSelectVm {
        dimension: dim,
        title: title.text(locale).to_string(),
        selected_label,
        options,
        interactive,
    }
}

fn event_card(event: &Event, locale: Locale) -> EventCardVm {
    let artist = event.artist.text(locale);
    EventCardVm {
        series: event
            .series
            .as_ref()
            .and_then(|s| s.label(locale))
            .map(str::to_string),
        long_title: artist.chars().count() > LONG_TITLE_CHARS,
        artist,
        date_label: Message::DateLabel.text(locale).to_string(),
        date: event
            .parsed_date()
            .map(|d| format_short_date(d, locale))
            .unwrap_or_else(|| event.date.clone()),
        venue_label: Message::VenueLabel.text(locale).to_string(),
        venue: event.venue.label(locale).to_string(),
        genre_label: Message::GenreLabel.text(locale).to_string(),
        genre: event.genre.label(locale).to_string(),
    }
}

pub fn events_page_vm(state: &AppState) -> EventsPageVm {
    let locale = state.locale;
    let engine = &state.engine;
    let filters = engine.state();
    let interactive = state.boot.is_ready();

    let (genres, years, venues) = match engine.catalog() {
        Some(catalog) => {
            let genres = pair_options(
                &catalog.meta.genres,
                Dimension::Genre,
                engine,
                filters.genre.as_deref(),
                locale,
            );
            let venues = pair_options(
                &catalog.meta.venues,
                Dimension::Venue,
                engine,
                filters.venue.as_deref(),
                locale,
            );
            let available = &engine.view().available;
            let years = catalog
                .years()
                .into_iter()
                .map(|y| FilterOptionVm {
                    value: y.to_string(),
                    label: y.to_string(),
                    enabled: available.years.contains(&y),
                    selected: filters.year == Some(y),
                })
                .collect();
            (genres, years, venues)
        }
        None => Default::default(),
    };

    let view = engine.view();
    let status = match &state.boot {
        BootState::Loading => EventsStatusVm::Loading {
            message: Message::Loading.text(locale).to_string(),
        },
        BootState::Failed(_) => EventsStatusVm::Failed {
            message: Message::Error.text(locale).to_string(),
        },
        BootState::Ready if view.is_empty() => EventsStatusVm::Empty {
            message: Message::NoResults.text(locale).to_string(),
        },
        BootState::Ready => EventsStatusVm::Results {
            cards: view.events.iter().map(|e| event_card(e, locale)).collect(),
        },
    };

    EventsPageVm {
        locale,
        labels: PageLabelsVm {
            artist: Message::Artist.text(locale).to_string(),
            search_placeholder: Message::SearchArtist.text(locale).to_string(),
            series: Message::SeriesLabel.text(locale).to_string(),
        },
        artist_query: state.artist_input().to_string(),
        genre: select_vm(Dimension::Genre, Message::Genre, genres, locale, interactive),
        year: select_vm(Dimension::Year, Message::Year, years, locale, interactive),
        venue: select_vm(Dimension::Venue, Message::Venue, venues, locale, interactive),
        clear_label: Message::ClearFilters.text(locale).to_string(),
        total_label: Message::Total.text(locale).to_string(),
        result_count: if interactive { view.len() } else { 0 },
        status,
    }
}

// --- Upcoming timeline ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionVm {
    pub label: String,
    pub url: Option<String>,
    pub enabled: bool,
}

impl ActionVm {
    fn new(message: Message, url: Option<&str>, locale: Locale) -> Self {
        let url = url.map(str::trim).filter(|u| !u.is_empty());
        Self {
            label: message.text(locale).to_string(),
            enabled: url.is_some(),
            url: url.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItemVm {
    pub id: String,
    pub date: String,
    pub title: String,
    /// `city • venue`, venue falling back to the localized "TBA".
    pub place: String,
    pub note: Option<String>,
    pub info: ActionVm,
    pub tickets: ActionVm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimelineVm {
    Idle,
    Loading { message: String },
    Failed { message: String },
    Items { items: Vec<TimelineItemVm> },
}

fn timeline_item(ev: &FutureEvent, locale: Locale) -> TimelineItemVm {
    let text = |field: &Option<kod_core::PartialText>| {
        field.as_ref().and_then(|t| t.label(locale)).map(str::to_string)
    };
    let venue = text(&ev.venue).unwrap_or_else(|| Message::Tba.text(locale).to_string());
    let city = text(&ev.city).unwrap_or_default();

    TimelineItemVm {
        id: ev.id.to_string(),
        date: ev
            .parsed_date()
            .map(|d| format_long_date(d, locale))
            .unwrap_or_else(|| ev.date.clone()),
        title: text(&ev.title).unwrap_or_default(),
        place: format!("{city} • {venue}"),
        note: text(&ev.note),
        info: ActionVm::new(Message::Info, ev.info_url.as_deref(), locale),
        tickets: ActionVm::new(Message::Tickets, ev.ticket_url.as_deref(), locale),
    }
}

pub fn timeline_vm(state: &AppState) -> TimelineVm {
    let locale = state.locale;
    match &state.timeline {
        TimelineState::Idle => TimelineVm::Idle,
        TimelineState::Loading => TimelineVm::Loading {
            message: Message::TimelineLoading.text(locale).to_string(),
        },
        TimelineState::Failed(_) => TimelineVm::Failed {
            message: Message::TimelineError.text(locale).to_string(),
        },
        TimelineState::Ready(events) => TimelineVm::Items {
            items: events.iter().map(|e| timeline_item(e, locale)).collect(),
        },
    }
}
