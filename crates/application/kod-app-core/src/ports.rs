use crate::viewmodel::{EventsPageVm, TimelineVm};

/// Replaces the current history entry (no new entry, no reload).
pub trait HistoryPort: Send + Sync + 'static {
    fn replace(&self, url: &str);
}

/// Projects view models onto a concrete surface. View models fully determine
/// the output; adapters hold no filtering logic of their own.
pub trait EventsRenderer {
    fn render_events(&mut self, vm: &EventsPageVm) -> anyhow::Result<()>;
    fn render_timeline(&mut self, vm: &TimelineVm) -> anyhow::Result<()>;
}
