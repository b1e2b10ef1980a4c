use serde::{Deserialize, Serialize};

pub mod contact;
pub mod date;
pub mod engine;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod query;
pub mod timeline;

pub use engine::{DerivedView, FilterEngine};
pub use error::LoadError;
pub use filter::{AvailableOptions, Dimension, FilterChange, FilterState};
pub use i18n::{Locale, Message};

/// Canonical identity of a genre or venue: its English label.
pub type CanonicalKey = String;

/// A label published in both site languages.
///
/// `en` doubles as the canonical key for matching, so it is required; a missing
/// Turkish label falls back to the English one when displayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedPair {
    #[serde(default)]
    pub tr: String,
    pub en: String,
}

impl LocalizedPair {
    pub fn new(tr: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            tr: tr.into(),
            en: en.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.en
    }

    pub fn label(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Tr if self.tr.is_empty() => &self.en,
            Locale::Tr => &self.tr,
        }
    }
}

/// One locale's rendering of the artist field: a single name or a line-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NameValue {
    One(String),
    Many(Vec<String>),
}

impl Default for NameValue {
    fn default() -> Self {
        NameValue::One(String::new())
    }
}

impl NameValue {
    pub fn joined(&self) -> String {
        match self {
            NameValue::One(s) => s.clone(),
            NameValue::Many(names) => names.join(", "),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtistName {
    #[serde(default)]
    pub tr: NameValue,
    #[serde(default)]
    pub en: NameValue,
}

impl ArtistName {
    pub fn text(&self, locale: Locale) -> String {
        match locale {
            Locale::Tr => self.tr.joined(),
            Locale::En => self.en.joined(),
        }
    }
}

/// Free-form text that may be translated into only one locale, or neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialText {
    #[serde(default)]
    pub tr: Option<String>,
    #[serde(default)]
    pub en: Option<String>,
}

impl PartialText {
    /// Trimmed text for `locale`, `None` when absent or blank.
    pub fn label(&self, locale: Locale) -> Option<&str> {
        let raw = match locale {
            Locale::Tr => self.tr.as_deref(),
            Locale::En => self.en.as_deref(),
        }?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub artist: ArtistName,
    pub genre: LocalizedPair,
    pub venue: LocalizedPair,
    /// `DD.MM.YYYY` or `DD-MM-YYYY`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<PartialText>,
}

impl Event {
    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        date::parse_event_date(&self.date)
    }

    pub fn year(&self) -> Option<i32> {
        date::event_year(&self.date)
    }
}

/// Descriptive option catalogs, independent of which events are visible.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    #[serde(default)]
    pub genres: Vec<LocalizedPair>,
    #[serde(default)]
    pub venues: Vec<LocalizedPair>,
}

/// The fetched events document: `{ meta, events }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    pub meta: Meta,
    pub events: Vec<Event>,
}

impl Catalog {
    /// Parses a fetched document. Both `meta` and `events` must be present.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let catalog: Catalog = serde_json::from_slice(bytes)
            .map_err(|e| LoadError::Malformed(format!("events catalog: {e}")))?;
        for event in catalog.events.iter().filter(|e| e.parsed_date().is_none()) {
            tracing::warn!("unreadable event date {:?}; listed last", event.date);
        }
        Ok(catalog)
    }

    /// Distinct event years, newest first.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.events.iter().filter_map(Event::year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }
}
