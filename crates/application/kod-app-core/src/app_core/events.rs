use std::sync::Arc;

use kod_core::timeline::FutureEvent;
use kod_core::{Catalog, FilterChange, LoadError};

use crate::domain::LoadId;

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Boot state
    CatalogLoadingStarted { load_id: LoadId },
    CatalogLoaded { load_id: LoadId, catalog: Arc<Catalog> },
    CatalogFailed { load_id: LoadId, error: LoadError },

    // Filters
    ArtistTyped(String),
    FilterChanged(FilterChange),
    FiltersCleared,

    // Navigation
    Navigated { path: String },

    // Upcoming timeline
    TimelineLoadingStarted,
    TimelineLoaded(Vec<FutureEvent>),
    TimelineFailed(LoadError),
}

impl DomainEvent {
    /// Events after which the URL must mirror the filter state again.
    pub fn touches_url(&self) -> bool {
        matches!(
            self,
            DomainEvent::CatalogLoaded { .. }
                | DomainEvent::FilterChanged(_)
                | DomainEvent::FiltersCleared
                | DomainEvent::Navigated { .. }
        )
    }
}
