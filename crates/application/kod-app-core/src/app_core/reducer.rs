use kod_core::query::split_location;
use kod_core::{FilterChange, Locale};

use crate::domain::{AppState, BootState, TimelineState};

use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        DomainEvent::CatalogLoadingStarted { load_id } => {
            state.boot = BootState::Loading;
            state.load_id = Some(load_id);
        }

        DomainEvent::CatalogLoaded { load_id: _, catalog } => {
            if !matches!(state.boot, BootState::Failed(_)) {
                state.engine.load(catalog);
                // Artist text typed during the fetch overrides the URL's.
                if let Some(text) = state.pending_artist.take() {
                    state.engine.apply(FilterChange::Artist(text));
                }
                state.boot = BootState::Ready;
            }
        }

        DomainEvent::CatalogFailed { load_id: _, error } => {
            state.boot = BootState::Failed(error);
            state.pending_artist = None;
        }

        // Filter interaction is disabled once loading has failed.
        DomainEvent::ArtistTyped(_)
        | DomainEvent::FilterChanged(_)
        | DomainEvent::FiltersCleared
            if matches!(state.boot, BootState::Failed(_)) => {}

        DomainEvent::ArtistTyped(text) => state.pending_artist = Some(text),

        // Settled before the catalog arrived: held until `CatalogLoaded`.
        DomainEvent::FilterChanged(FilterChange::Artist(text)) if !state.engine.is_loaded() => {
            state.pending_artist = Some(text);
        }

        DomainEvent::FilterChanged(change) => {
            if matches!(change, FilterChange::Artist(_)) {
                state.pending_artist = None;
            }
            state.engine.apply(change);
        }

        DomainEvent::FiltersCleared => {
            state.pending_artist = None;
            state.engine.clear_all();
        }

        DomainEvent::Navigated { path } => {
            let (path, _) = split_location(&path);
            state.locale = Locale::from_path(path);
            state.path = path.to_string();
        }

        DomainEvent::TimelineLoadingStarted => state.timeline = TimelineState::Loading,
        DomainEvent::TimelineLoaded(items) => state.timeline = TimelineState::Ready(items),
        DomainEvent::TimelineFailed(error) => state.timeline = TimelineState::Failed(error),
    }
    state
}
