use kod_core::query::{parse_query, split_location};
use kod_core::timeline::FutureEvent;
use kod_core::{FilterEngine, LoadError, Locale};

pub type LoadId = uuid::Uuid;

/// Lifecycle of the events page. `Failed` is terminal: there is no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootState {
    Loading,
    Ready,
    Failed(LoadError),
}

impl BootState {
    pub fn is_ready(&self) -> bool {
        matches!(self, BootState::Ready)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, BootState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineState {
    Idle,
    Loading,
    Ready(Vec<FutureEvent>),
    Failed(LoadError),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub boot: BootState,
    pub locale: Locale,
    /// Current page path without query, e.g. `/en/events`.
    pub path: String,
    pub engine: FilterEngine,
    /// Artist text typed but not yet settled by the debounce timer.
    pub pending_artist: Option<String>,
    pub load_id: Option<LoadId>,
    pub timeline: TimelineState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_location("/")
    }
}

impl AppState {
    /// Initial state for a page at `location` (path plus optional query).
    /// The query seeds the filter selection; the path picks the locale.
    pub fn from_location(location: &str) -> Self {
        let (path, query) = split_location(location);
        Self {
            boot: BootState::Loading,
            locale: Locale::from_path(path),
            path: path.to_string(),
            engine: FilterEngine::with_state(parse_query(query)),
            pending_artist: None,
            load_id: None,
            timeline: TimelineState::Idle,
        }
    }

    /// What the artist input box currently shows.
    pub fn artist_input(&self) -> &str {
        self.pending_artist
            .as_deref()
            .unwrap_or(&self.engine.state().artist)
    }
}
