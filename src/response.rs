//! Response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

/// `{"success": true, "<key>": data}`. The key is per resource and operation.
pub fn envelope<T: Serialize>(key: &str, data: &T) -> Result<Value, serde_json::Error> {
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert(key.to_string(), serde_json::to_value(data)?);
    Ok(Value::Object(body))
}

pub fn success_created<T: Serialize>(
    key: &str,
    data: &T,
) -> Result<(StatusCode, Json<Value>), serde_json::Error> {
    Ok((StatusCode::CREATED, Json(envelope(key, data)?)))
}

pub fn success_ok<T: Serialize>(
    key: &str,
    data: &T,
) -> Result<(StatusCode, Json<Value>), serde_json::Error> {
    Ok((StatusCode::OK, Json(envelope(key, data)?)))
}
