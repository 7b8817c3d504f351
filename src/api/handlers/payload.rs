//! Presence rules shared by the request payloads.
//!
//! Create payloads need every field present and non-null. Update payloads
//! read each field leniently: `null`, `false`, `0` and `""` count as not
//! provided, so an update made only of such values is rejected with the
//! resource message rather than a type error.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Required on create: absent or `null` fails naming the field.
pub(crate) fn required<T>(value: Option<T>, field: &'static str) -> AppResult<T> {
    value.ok_or(AppError::MissingField(field))
}

/// RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

/// Strict timestamp field, `null` reads as absent.
pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    raw.map(|value| {
        parse_timestamp(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", value)))
    })
    .transpose()
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Lenient read of an update field: falsy values are `None`.
fn provided_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(value).filter(|v| !is_falsy(v)))
}

/// Update text field.
pub(crate) fn provided_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match provided_value(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected text, found {}", other))),
    }
}

/// Update id field; numeric strings are accepted.
pub(crate) fn provided_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match provided_value(deserializer)? {
        None => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(_) => None,
    };

    id.map(Some)
        .ok_or_else(|| de::Error::custom("expected an integer id"))
}

/// Update timestamp field.
pub(crate) fn provided_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match provided_value(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", s))),
        Some(other) => Err(de::Error::custom(format!("expected a timestamp, found {}", other))),
    }
}
