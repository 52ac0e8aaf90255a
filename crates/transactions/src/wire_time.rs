//! Lenient date and timestamp decoding.
//!
//! The service is not consistent about its formats: the same field may come
//! back as `2024-03-15`, `2024-03-15T00:00:00`, `2019-02-20T22:04:01.087` (no
//! offset) or full RFC 3339. A response that was already acted upon must not
//! fail to decode over that, so every form is accepted here. Offset-less
//! timestamps are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn de_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    raw.map(|s| {
        parse_date(&s).ok_or_else(|| serde::de::Error::custom(format!("cannot parse '{s}' as a date")))
    })
    .transpose()
}

pub fn de_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    raw.map(|s| {
        parse_timestamp(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("cannot parse '{s}' as a timestamp")))
    })
    .transpose()
}

/// Calendar date, or the local date part of a date-time.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    s.parse::<NaiveDateTime>().ok().map(|dt| dt.date())
}

/// Instant in UTC. Dates alone are taken as midnight.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
