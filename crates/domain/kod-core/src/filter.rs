use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{CanonicalKey, Event, Locale};

/// Current selection across the four filter dimensions.
///
/// An empty `artist` and `None` elsewhere mean "no restriction". Genre and
/// venue always hold the English canonical key, whatever the display locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub artist: String,
    pub genre: Option<CanonicalKey>,
    pub year: Option<i32>,
    pub venue: Option<CanonicalKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Artist,
    Genre,
    Year,
    Venue,
}

impl Dimension {
    /// Dimensions rendered as selects with cascading availability.
    pub const CASCADING: [Dimension; 3] = [Dimension::Genre, Dimension::Year, Dimension::Venue];
}

/// A single user edit to the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Artist(String),
    Genre(Option<CanonicalKey>),
    Year(Option<i32>),
    Venue(Option<CanonicalKey>),
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.artist.is_empty() && self.genre.is_none() && self.year.is_none() && self.venue.is_none()
    }

    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Artist(q) => self.artist = q,
            FilterChange::Genre(g) => self.genre = g.filter(|g| !g.is_empty()),
            FilterChange::Year(y) => self.year = y,
            FilterChange::Venue(v) => self.venue = v.filter(|v| !v.is_empty()),
        }
    }

    /// Copy of this state with one dimension left unconstrained.
    pub fn without(&self, dim: Dimension) -> FilterState {
        let mut s = self.clone();
        match dim {
            Dimension::Artist => s.artist.clear(),
            Dimension::Genre => s.genre = None,
            Dimension::Year => s.year = None,
            Dimension::Venue => s.venue = None,
        }
        s
    }
}

/// Case-insensitive substring match against both the Turkish and English
/// renderings of the artist, regardless of which one is displayed.
fn artist_matches(event: &Event, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [Locale::Tr, Locale::En]
        .into_iter()
        .any(|l| event.artist.text(l).to_lowercase().contains(&needle))
}

pub fn match_event(event: &Event, state: &FilterState) -> bool {
    if !artist_matches(event, &state.artist) {
        return false;
    }
    if let Some(genre) = &state.genre {
        if event.genre.key() != genre {
            return false;
        }
    }
    if let Some(year) = state.year {
        if event.year() != Some(year) {
            return false;
        }
    }
    if let Some(venue) = &state.venue {
        if event.venue.key() != venue {
            return false;
        }
    }
    true
}

/// Option keys that remain selectable in each cascading select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailableOptions {
    pub genres: BTreeSet<CanonicalKey>,
    pub years: BTreeSet<i32>,
    pub venues: BTreeSet<CanonicalKey>,
}

impl AvailableOptions {
    pub fn is_enabled(&self, dim: Dimension, key: &str) -> bool {
        match dim {
            Dimension::Genre => self.genres.contains(key),
            Dimension::Venue => self.venues.contains(key),
            Dimension::Year => key.parse::<i32>().is_ok_and(|y| self.years.contains(&y)),
            Dimension::Artist => true,
        }
    }

    /// Presentation-neutral form: dimension to the set of enabled option values.
    pub fn enabled_keys(&self) -> BTreeMap<Dimension, BTreeSet<String>> {
        BTreeMap::from([
            (Dimension::Genre, self.genres.clone()),
            (Dimension::Year, self.years.iter().map(i32::to_string).collect()),
            (Dimension::Venue, self.venues.clone()),
        ])
    }
}

/// Each dimension's availability is derived from the events that satisfy the
/// other three constraints, so a selection never narrows its own select.
pub fn compute_available_options(events: &[Event], state: &FilterState) -> AvailableOptions {
    let mut out = AvailableOptions::default();

    let genre_scope = state.without(Dimension::Genre);
    let year_scope = state.without(Dimension::Year);
    let venue_scope = state.without(Dimension::Venue);

    for event in events {
        if match_event(event, &genre_scope) {
            out.genres.insert(event.genre.key().to_string());
        }
        if match_event(event, &year_scope) {
            if let Some(y) = event.year() {
                out.years.insert(y);
            }
        }
        if match_event(event, &venue_scope) {
            out.venues.insert(event.venue.key().to_string());
        }
    }

    out
}

/// Most recent first. Stable, so equal dates keep catalog order; events with
/// unreadable dates go last.
pub fn sort_for_display(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by_key(|e| {
        let date = e.parsed_date();
        (date.is_none(), Reverse(date))
    });
    events
}
