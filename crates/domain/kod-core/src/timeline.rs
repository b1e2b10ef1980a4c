//! Upcoming-events timeline: a separate catalog of announced dates.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{date::parse_event_date, LoadError, PartialText};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FutureEventId {
    Number(u64),
    Text(String),
}

impl fmt::Display for FutureEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FutureEventId::Number(n) => write!(f, "{n}"),
            FutureEventId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FutureEvent {
    pub id: FutureEventId,
    /// `DD-MM-YYYY`.
    pub date: String,
    #[serde(default)]
    pub title: Option<PartialText>,
    #[serde(default)]
    pub venue: Option<PartialText>,
    #[serde(default)]
    pub city: Option<PartialText>,
    #[serde(default)]
    pub note: Option<PartialText>,
    #[serde(default)]
    pub info_url: Option<String>,
    #[serde(default)]
    pub ticket_url: Option<String>,
}

impl FutureEvent {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FutureCatalog {
    #[serde(default)]
    pub events: Vec<FutureEvent>,
}

impl FutureCatalog {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        serde_json::from_slice(bytes)
            .map_err(|e| LoadError::Malformed(format!("future events: {e}")))
    }
}

/// Items dated `today` or later, soonest first. Undated items are left out.
pub fn upcoming(events: &[FutureEvent], today: NaiveDate) -> Vec<FutureEvent> {
    let mut out: Vec<(NaiveDate, FutureEvent)> = events
        .iter()
        .filter_map(|e| e.parsed_date().map(|d| (d, e.clone())))
        .filter(|(d, _)| *d >= today)
        .collect();
    out.sort_by_key(|(d, _)| *d);
    out.into_iter().map(|(_, e)| e).collect()
}
