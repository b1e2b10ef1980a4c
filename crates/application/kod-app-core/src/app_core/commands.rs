use chrono::NaiveDate;
use kod_core::FilterChange;

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Boot
    LoadCatalog,

    // Filters
    /// Free-text artist input; settles after the debounce delay.
    TypeArtist(String),
    ChangeFilter(FilterChange),
    ClearFilters,

    // Navigation (history pop): re-detects the locale from the new path.
    Navigate(String),

    // Upcoming timeline
    LoadTimeline { today: NaiveDate },
}
