//! Date/time input parsing and ISO-8601 output for achievement dates.
//!
//! Achievement dates are naive (no zone). Inputs may be a bare `YYYY-MM-DD`,
//! a naive ISO date-time, or RFC 3339 with an offset (converted to UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Parses any of the accepted date spellings.
pub fn parse_flexible(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Formats a date-time as ISO-8601 (`YYYY-MM-DDTHH:MM:SS[.ffffff]`).
/// Fractional seconds appear only when non-zero.
pub fn to_iso(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// `deserialize_with` target for required date fields.
pub fn flexible<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flexible(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date or date-time: {raw}")))
}

/// `deserialize_with` target for optional date fields. Empty strings count as absent.
pub fn flexible_option<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_flexible(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date or date-time: {s}"))),
    }
}
