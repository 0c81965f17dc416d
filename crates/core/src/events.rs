//! Event type definitions for the ETL.
//!
//! `RawEvent` is the shape of one source line, `CleanEvent` its flattened,
//! typed form. `UserActivityRow` and `AggEventRow` are the two output tables.

use chrono::NaiveDateTime;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::table::TableRow;
use crate::timestamp::parse_timestamp;
use crate::url_levels::decompose;

/// Accepts a JSON string, number or boolean as a string.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!("expected a scalar, found {other}"))),
    }
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(de::Error::custom(format!("expected a scalar, found {other}"))),
    }
}

/// Accepts a JSON integer, or a float with no fractional part, as an `i64`.
/// JSON Schema counts `66374.0` as an integer, so decoding must as well.
fn integral_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(de::Error::custom(format!("expected an integer, found {value}"))),
    }
}

/// User sub-object of a source event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(deserialize_with = "scalar_string")]
    pub session_id: String,
    #[serde(deserialize_with = "integral_number")]
    pub id: i64,
    #[serde(deserialize_with = "scalar_string")]
    pub ip: String,
}

/// A source event as read from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(deserialize_with = "scalar_string")]
    pub event_id: String,
    pub user: RawUser,
    #[serde(deserialize_with = "scalar_string")]
    pub action: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub url: Option<String>,
    pub timestamp: String,
}

impl RawEvent {
    /// Decode a schema-validated document.
    pub fn from_value(doc: Value) -> Result<Self> {
        serde_json::from_value(doc).map_err(|e| Error::schema_violation(e.to_string()))
    }
}

/// Flattened, typed event. Column order is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanEvent {
    pub event_id: String,
    pub user_session_id: String,
    pub user_id: i64,
    pub user_ip: String,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub time_stamp: NaiveDateTime,
    pub url: String,
    pub url_level1: Option<String>,
    pub url_level2: Option<String>,
    pub url_level3: Option<String>,
    pub activity: String,
}

impl CleanEvent {
    /// Flatten a raw event: parse its timestamp, lift the user fields and
    /// decompose the URL.
    pub fn from_raw(raw: RawEvent) -> Result<Self> {
        let time_stamp = parse_timestamp(&raw.timestamp)?;
        let url = raw.url.unwrap_or_default();
        let levels = decompose(Some(&url));

        Ok(Self {
            event_id: raw.event_id,
            user_session_id: raw.user.session_id,
            user_id: raw.user.id,
            user_ip: raw.user.ip,
            time_stamp,
            url,
            url_level1: levels.level1,
            url_level2: levels.level2,
            url_level3: levels.level3,
            activity: raw.action,
        })
    }
}

impl TableRow for CleanEvent {
    const COLUMNS: &'static [&'static str] = &[
        "event_id",
        "user_session_id",
        "user_id",
        "user_ip",
        "time_stamp",
        "url",
        "url_level1",
        "url_level2",
        "url_level3",
        "activity",
    ];
}

/// Per-event user activity row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserActivityRow {
    pub user_id: i64,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub time_stamp: NaiveDateTime,
    pub url_level1: Option<String>,
    pub url_level2: Option<String>,
    pub url_level3: Option<String>,
    pub activity: String,
}

impl From<&CleanEvent> for UserActivityRow {
    fn from(event: &CleanEvent) -> Self {
        Self {
            user_id: event.user_id,
            time_stamp: event.time_stamp,
            url_level1: event.url_level1.clone(),
            url_level2: event.url_level2.clone(),
            url_level3: event.url_level3.clone(),
            activity: event.activity.clone(),
        }
    }
}

impl TableRow for UserActivityRow {
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "time_stamp",
        "url_level1",
        "url_level2",
        "url_level3",
        "activity",
    ];
}

/// Aggregate counts for one `(time_bucket, url_level1, url_level2, activity)` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggEventRow {
    pub time_bucket: String,
    pub url_level1: String,
    pub url_level2: String,
    pub activity: String,
    pub activity_count: u64,
    pub user_count: u64,
}

impl TableRow for AggEventRow {
    const COLUMNS: &'static [&'static str] = &[
        "time_bucket",
        "url_level1",
        "url_level2",
        "activity",
        "activity_count",
        "user_count",
    ];
}
