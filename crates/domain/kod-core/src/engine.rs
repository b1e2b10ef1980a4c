use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::filter::{compute_available_options, match_event, sort_for_display};
use crate::{AvailableOptions, Catalog, Event, FilterChange, FilterState};

/// Everything the events page shows for one filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedView {
    /// Matching events, most recent first.
    pub events: Vec<Event>,
    pub available: AvailableOptions,
}

impl DerivedView {
    pub fn derive(events: &[Event], state: &FilterState) -> Self {
        let matched = events
            .iter()
            .filter(|e| match_event(e, state))
            .cloned()
            .collect();
        Self {
            events: sort_for_display(matched),
            available: compute_available_options(events, state),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Owns the loaded catalog and the current filter selection, and keeps the
/// derived view in step with every change.
///
/// Before a catalog is loaded every operation is a no-op that yields an empty
/// view. Selections are never cleared by cascading: a value that became
/// unavailable stays selected until it is changed explicitly.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    catalog: Option<Arc<Catalog>>,
    state: FilterState,
    view: DerivedView,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine waiting for its catalog, primed with a state read from the URL.
    pub fn with_state(state: FilterState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Installs the catalog and derives the first view.
    ///
    /// Select values carried over from the URL that match no option of their
    /// select are dropped here; the artist text is kept as typed.
    pub fn load(&mut self, catalog: impl Into<Arc<Catalog>>) -> &DerivedView {
        let catalog = catalog.into();

        if let Some(genre) = self.state.genre.take() {
            if catalog.meta.genres.iter().any(|g| g.key() == genre) {
                self.state.genre = Some(genre);
            } else {
                debug!("dropping unknown genre selection {genre:?}");
            }
        }
        if let Some(venue) = self.state.venue.take() {
            if catalog.meta.venues.iter().any(|v| v.key() == venue) {
                self.state.venue = Some(venue);
            } else {
                debug!("dropping unknown venue selection {venue:?}");
            }
        }
        if let Some(year) = self.state.year.take() {
            if catalog.years().contains(&year) {
                self.state.year = Some(year);
            } else {
                debug!("dropping unknown year selection {year}");
            }
        }

        self.catalog = Some(catalog);
        self.rederive()
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn apply(&mut self, change: FilterChange) -> &DerivedView {
        self.apply_all([change])
    }

    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = FilterChange>) -> &DerivedView {
        if self.catalog.is_none() {
            return &self.view;
        }
        for change in changes {
            self.state.apply(change);
        }
        self.rederive()
    }

    pub fn clear_all(&mut self) -> &DerivedView {
        if self.catalog.is_none() {
            return &self.view;
        }
        self.state = FilterState::default();
        self.rederive()
    }

    fn rederive(&mut self) -> &DerivedView {
        self.view = match &self.catalog {
            Some(c) => DerivedView::derive(&c.events, &self.state),
            None => DerivedView::default(),
        };
        &self.view
    }
}
