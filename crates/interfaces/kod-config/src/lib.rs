//! Central configuration constants for resource locations, timings and limits.

use std::time::Duration;

/// Site-relative path of the past-events catalog document.
pub const EVENTS_RESOURCE: &str = "/kod_muzik_events.json";

/// Site-relative path of the upcoming-events timeline document.
pub const FUTURE_EVENTS_RESOURCE: &str = "/future_events.json";

/// Path segment that selects English. Any other path renders Turkish.
pub const ENGLISH_PREFIX: &str = "/en";

/// Trailing-edge delay applied to free-text artist search.
pub const ARTIST_DEBOUNCE_MS: u64 = 300;

/// Artist names longer than this many characters get the long-title style.
pub const LONG_TITLE_CHARS: usize = 30;

/// Minimum trimmed length of the contact form name field.
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum trimmed length of the contact form message field.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Mailbox that receives contact form submissions.
pub const CONTACT_RECIPIENT: &str = "iletisim@kodmuzik.com";

/// Upper bound for a single catalog request.
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Debounce delay as a [`Duration`].
pub fn artist_debounce() -> Duration {
    Duration::from_millis(ARTIST_DEBOUNCE_MS)
}
