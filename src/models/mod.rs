//! Typed resource rows, create payloads and partial-update patches.

mod book;
mod coffee_order;
mod coffee_type;
mod student;

pub use book::{Book, BookPatch, NewBook};
pub use coffee_order::{CoffeeOrder, CoffeeOrderPatch, NewCoffeeOrder};
pub use coffee_type::{CoffeeType, CoffeeTypePatch, NewCoffeeType};
pub use student::{NewStudent, Student, StudentPatch};

use crate::error::AppError;
use crate::schema::TableDef;
use crate::service::validation::{
    is_non_empty_string, parse_date, parse_integer, parse_numeric_id, parse_timestamp,
};
use crate::sql::Fields;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Response keys used for the `{"success": true, <key>: row}` envelope.
#[derive(Clone, Copy, Debug)]
pub struct EnvelopeKeys {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

/// A record type served under `/api/v1/<path>`.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const NOT_FOUND: &'static str;
    const KEYS: EnvelopeKeys;

    type New: Payload;
    type Patch: Payload;

    fn table() -> &'static TableDef;

    /// Turn the `:id` path segment into the lookup key value.
    fn parse_key(raw: &str) -> Result<Value, AppError> {
        parse_numeric_id(raw)
    }
}

/// A validated request body that maps onto table columns.
pub trait Payload: Sized + Send {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError>;

    /// Staged column values. Empty for a patch that changes nothing.
    fn into_fields(self) -> Fields;
}

fn push<T: Into<Value>>(fields: &mut Fields, name: &'static str, value: Option<T>) {
    if let Some(v) = value {
        fields.push((name, v.into()));
    }
}

fn required_string(body: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    optional_string(body, field)
        .ok_or_else(|| AppError::Validation(format!("{} is required and must be a non-empty string", field)))
}

fn required_date(body: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    body.get(field)
        .and_then(parse_date)
        .ok_or_else(|| date_error(field))
}

fn required_timestamp(body: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    body.get(field)
        .and_then(parse_timestamp)
        .ok_or_else(|| timestamp_error(field))
}

fn required_integer(body: &Map<String, Value>, field: &str) -> Result<i64, AppError> {
    body.get(field)
        .and_then(parse_integer)
        .ok_or_else(|| integer_error(field))
}

/// Present and non-empty, otherwise skipped.
fn optional_string(body: &Map<String, Value>, field: &str) -> Option<String> {
    body.get(field)
        .filter(|v| is_non_empty_string(v))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Absent is skipped; present but unparseable is an error.
fn optional_date(body: &Map<String, Value>, field: &str) -> Result<Option<String>, AppError> {
    match body.get(field) {
        None => Ok(None),
        Some(v) => parse_date(v).map(Some).ok_or_else(|| date_error(field)),
    }
}

fn optional_timestamp(body: &Map<String, Value>, field: &str) -> Result<Option<String>, AppError> {
    match body.get(field) {
        None => Ok(None),
        Some(v) => parse_timestamp(v).map(Some).ok_or_else(|| timestamp_error(field)),
    }
}

fn optional_integer(body: &Map<String, Value>, field: &str) -> Result<Option<i64>, AppError> {
    match body.get(field) {
        None => Ok(None),
        Some(v) => parse_integer(v).map(Some).ok_or_else(|| integer_error(field)),
    }
}

fn date_error(field: &str) -> AppError {
    AppError::Validation(format!("{} must be a valid date (YYYY-MM-DD)", field))
}

fn timestamp_error(field: &str) -> AppError {
    AppError::Validation(format!("{} must be a valid date or timestamp", field))
}

fn integer_error(field: &str) -> AppError {
    AppError::Validation(format!("{} must be an integer", field))
}

/// `count` is an INTEGER column.
fn check_i32(field: &str, n: i64) -> Result<i64, AppError> {
    i32::try_from(n)
        .map(i64::from)
        .map_err(|_| AppError::Validation(format!("{} is out of range", field)))
}
