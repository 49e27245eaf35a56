use crate::value::AttrValue;
use chrono::{DateTime, Datelike, NaiveDate};

/// Year produced when a non-null date value cannot be parsed, matching the
/// epoch fallback the upstream data pipeline emits. Year binning treats it
/// as a null-date sentinel and excludes it from unique-year sets.
pub const EPOCH_SENTINEL_YEAR: i32 = 1970;

/// Extracts the calendar year of a date-valued attribute. Null is `None`;
/// any other unparseable value collapses to [`EPOCH_SENTINEL_YEAR`].
pub fn year_of(value: &AttrValue) -> Option<i32> {
    match value {
        AttrValue::Null => None,
        AttrValue::Number(millis) => {
            let secs = (millis / 1000.0).floor() as i64;
            Some(
                DateTime::from_timestamp(secs, 0)
                    .map(|dt| dt.year())
                    .unwrap_or(EPOCH_SENTINEL_YEAR),
            )
        }
        AttrValue::Text(s) => Some(parse_date(s).map(|d| d.year()).unwrap_or_else(|| {
            // A bare 4-digit year is a valid date value in this data.
            s.trim()
                .parse::<i32>()
                .ok()
                .filter(|y| (1000..=9999).contains(y))
                .unwrap_or(EPOCH_SENTINEL_YEAR)
        })),
    }
}

/// Parses the date formats seen in feature attributes: RFC 3339,
/// `YYYY-MM-DD`, and `M/D/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    None
}
