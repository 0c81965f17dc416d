//! Timestamp parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serializer;

use crate::error::{Error, Result};

/// Naive datetime layouts accepted in the source feed, tried in order.
/// Slash dates are month first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Layout used when writing timestamps to output tables.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Hourly bucket layout: year, day, month, hour.
pub const TIME_BUCKET_FORMAT: &str = "%Y%d%m%H";

/// Parse a source timestamp.
///
/// Offsets in RFC 3339 values are kept as wall-clock time; the offset itself
/// is discarded.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::invalid_timestamp(value))
}

/// Hourly bucket key for a timestamp, e.g. `2017-02-02 20:26` -> `2017020220`.
pub fn time_bucket(ts: &NaiveDateTime) -> String {
    ts.format(TIME_BUCKET_FORMAT).to_string()
}

/// Serde adapter writing timestamps in [`OUTPUT_FORMAT`].
pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(OUTPUT_FORMAT))
}
