use chrono::{Datelike, NaiveDate};

/// Day-first formats accepted in catalog documents. Never month-first.
const EVENT_DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%d-%m-%Y"];

/// Parses `DD.MM.YYYY` or `DD-MM-YYYY`. Surrounding whitespace is ignored.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    EVENT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

pub fn event_year(raw: &str) -> Option<i32> {
    parse_event_date(raw).map(|d| d.year())
}
