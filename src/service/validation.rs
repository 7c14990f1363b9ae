//! Field validation for request bodies and path identifiers.

use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

/// True iff `v` is a string whose trimmed form is non-empty.
pub fn is_non_empty_string(v: &Value) -> bool {
    v.as_str().map_or(false, |s| !s.trim().is_empty())
}

/// Normalized `YYYY-MM-DD` when `v` is a string holding a calendar date.
/// Accepts a bare date or a full timestamp (its date part is kept).
pub fn parse_date(v: &Value) -> Option<String> {
    let s = v.as_str()?.trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
        .or_else(|| parse_naive_datetime(s).map(|d| d.date()))?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// RFC 3339 timestamp in UTC when `v` is a string holding a timestamp or a date.
/// Naive timestamps are read as UTC; a bare date is midnight UTC.
pub fn parse_timestamp(v: &Value) -> Option<String> {
    let s = v.as_str()?.trim();
    let ts: DateTime<Utc> = DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| parse_naive_datetime(s).map(|d| d.and_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })?;
    Some(ts.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// JSON number with no fractional part within `i64`. `2` and `2.0` both qualify; strings do not.
pub fn parse_integer(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Numeric path identifier. Anything else is rejected before the store is touched.
pub fn parse_numeric_id(raw: &str) -> Result<Value, AppError> {
    raw.trim()
        .parse::<i64>()
        .map(Value::from)
        .map_err(|_| AppError::BadRequest("Invalid id".into()))
}

/// Body must be a JSON object.
pub fn body_object(body: Value) -> Result<serde_json::Map<String, Value>, AppError> {
    match body {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
