use std::io::Write;
use std::sync::{Arc, Mutex};

use kod_app_core::ports::{EventsRenderer, HistoryPort};
use kod_app_core::viewmodel::{
    ActionVm, EventsPageVm, EventsStatusVm, FilterSelectVm, TimelineVm,
};
use tracing::debug;

/// Plain-text projection for terminals.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `Genre: [All] Jazz (World Music)`: brackets mark the selection,
/// parentheses options that would lead to no results.
fn select_line(select: &FilterSelectVm) -> String {
    let options: Vec<String> = select
        .options
        .iter()
        .map(|o| match (o.selected, o.enabled) {
            (true, _) => format!("[{}]", o.label),
            (false, true) => o.label.clone(),
            (false, false) => format!("({})", o.label),
        })
        .collect();
    format!("{}: {}", select.title, options.join(" "))
}

fn action(a: &ActionVm) -> String {
    match &a.url {
        Some(url) if a.enabled => format!("{}: {url}", a.label),
        _ => format!("{}: -", a.label),
    }
}

impl<W: Write> EventsRenderer for TextRenderer<W> {
    fn render_events(&mut self, vm: &EventsPageVm) -> anyhow::Result<()> {
        let out = &mut self.out;
        let artist = if vm.artist_query.is_empty() {
            vm.labels.search_placeholder.as_str()
        } else {
            vm.artist_query.as_str()
        };
        writeln!(out, "{}: {artist}", vm.labels.artist)?;
        for select in [&vm.genre, &vm.year, &vm.venue] {
            writeln!(out, "{}", select_line(select))?;
        }
        writeln!(out, "{}: {}", vm.total_label, vm.result_count)?;
        writeln!(out)?;

        match &vm.status {
            EventsStatusVm::Loading { message }
            | EventsStatusVm::Failed { message }
            | EventsStatusVm::Empty { message } => writeln!(out, "{message}")?,
            EventsStatusVm::Results { cards } => {
                for card in cards {
                    writeln!(out, "{}", card.artist)?;
                    if let Some(series) = &card.series {
                        writeln!(out, "  {} {series}", vm.labels.series)?;
                    }
                    writeln!(out, "  {} {}", card.genre_label, card.genre)?;
                    writeln!(out, "  {} {}", card.date_label, card.date)?;
                    writeln!(out, "  {} {}", card.venue_label, card.venue)?;
                }
            }
        }
        Ok(())
    }

    fn render_timeline(&mut self, vm: &TimelineVm) -> anyhow::Result<()> {
        let out = &mut self.out;
        match vm {
            TimelineVm::Idle => {}
            TimelineVm::Loading { message } | TimelineVm::Failed { message } => {
                writeln!(out, "{message}")?
            }
            TimelineVm::Items { items } => {
                for item in items {
                    writeln!(out, "{}  {}", item.date, item.title)?;
                    writeln!(out, "  {}", item.place)?;
                    if let Some(note) = &item.note {
                        writeln!(out, "  {note}")?;
                    }
                    writeln!(out, "  {} | {}", action(&item.info), action(&item.tickets))?;
                }
            }
        }
        Ok(())
    }
}

/// Pretty JSON of the view models, one document per render.
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventsRenderer for JsonRenderer<W> {
    fn render_events(&mut self, vm: &EventsPageVm) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, vm)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn render_timeline(&mut self, vm: &TimelineVm) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, vm)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Keeps the most recent replacement URL; a terminal has no address bar.
#[derive(Clone, Default)]
pub struct LastUrl {
    url: Arc<Mutex<Option<String>>>,
}

impl LastUrl {
    pub fn get(&self) -> Option<String> {
        self.url.lock().ok().and_then(|g| g.clone())
    }
}

impl HistoryPort for LastUrl {
    fn replace(&self, url: &str) {
        debug!("history.replace {url}");
        if let Ok(mut guard) = self.url.lock() {
            *guard = Some(url.to_string());
        }
    }
}
