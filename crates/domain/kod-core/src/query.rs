//! Filter state <-> URL query string, with `application/x-www-form-urlencoded`
//! rules (space as `+`), so links written by the browser and by us agree.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use crate::FilterState;

const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

pub const PARAM_ARTIST: &str = "artist";
pub const PARAM_GENRE: &str = "genre";
pub const PARAM_YEAR: &str = "year";
pub const PARAM_VENUE: &str = "venue";

fn encode(value: &str) -> String {
    utf8_percent_encode(value, FORM)
        .to_string()
        .replace("%20", "+")
}

fn decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Iterates decoded `(key, value)` pairs of a query string, leading `?` optional.
pub fn pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .strip_prefix('?')
        .unwrap_or(query)
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|p| match p.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(p), String::new()),
        })
}

/// Reads `artist`, `genre`, `year` and `venue`. Absent or empty parameters stay
/// unset, other keys are ignored, and the first occurrence of a key wins.
pub fn parse_query(query: &str) -> FilterState {
    let mut state = FilterState::default();
    let mut seen = [false; 4];

    for (key, value) in pairs(query) {
        let slot = match key.as_str() {
            PARAM_ARTIST => 0,
            PARAM_GENRE => 1,
            PARAM_YEAR => 2,
            PARAM_VENUE => 3,
            _ => continue,
        };
        if std::mem::replace(&mut seen[slot], true) || value.is_empty() {
            continue;
        }
        match slot {
            0 => state.artist = value,
            1 => state.genre = Some(value),
            2 => match value.trim().parse::<i32>() {
                Ok(y) => state.year = Some(y),
                Err(_) => debug!("ignoring non-numeric year parameter {value:?}"),
            },
            _ => state.venue = Some(value),
        }
    }

    state
}

/// Serializes set dimensions in a fixed order; unset ones are omitted.
pub fn to_query(state: &FilterState) -> String {
    let mut parts = Vec::with_capacity(4);
    if !state.artist.is_empty() {
        parts.push(format!("{PARAM_ARTIST}={}", encode(&state.artist)));
    }
    if let Some(genre) = &state.genre {
        parts.push(format!("{PARAM_GENRE}={}", encode(genre)));
    }
    if let Some(year) = state.year {
        parts.push(format!("{PARAM_YEAR}={year}"));
    }
    if let Some(venue) = &state.venue {
        parts.push(format!("{PARAM_VENUE}={}", encode(venue)));
    }
    parts.join("&")
}

/// The URL to put in place of the current history entry: `path` alone when
/// nothing is filtered, `path?query` otherwise.
pub fn replacement_url(path: &str, state: &FilterState) -> String {
    let query = to_query(state);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Splits `"/en/events?genre=Jazz"` into path and query.
pub fn split_location(location: &str) -> (&str, &str) {
    let without_fragment = location.split('#').next().unwrap_or(location);
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    }
}
