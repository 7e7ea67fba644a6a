//! Permissive mixed-format date/time parsing.
//!
//! Source files carry dates in whatever shape the upstream system exported:
//! ISO dates, ISO datetimes with `T` or space separators, US-style slash
//! dates, with or without a time component. Each value is tried against a
//! fixed format list, first match wins. Unparseable or absent values become
//! an explicit absent marker, never a fabricated epoch timestamp.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d %b %Y",
    "%B %d, %Y",
];

/// Parses a date or datetime value against the accepted format list.
///
/// Date-only inputs parse to midnight. Returns `None` for absent, blank, or
/// unparseable input.
///
/// # Examples
///
/// ```
/// use clinic_core::datetime::parse_mixed_datetime;
///
/// let dt = parse_mixed_datetime(Some("2024-03-05 09:30:00")).unwrap();
/// assert_eq!(dt.to_string(), "2024-03-05 09:30:00");
///
/// let dt = parse_mixed_datetime(Some("03/05/2024")).unwrap();
/// assert_eq!(dt.to_string(), "2024-03-05 00:00:00");
///
/// assert!(parse_mixed_datetime(Some("not a date")).is_none());
/// assert!(parse_mixed_datetime(None).is_none());
/// ```
pub fn parse_mixed_datetime(raw: Option<&str>) -> Option<NaiveDateTime> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
