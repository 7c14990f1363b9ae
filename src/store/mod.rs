//! Store handle injected into every handler. Rows are JSON objects keyed by column name.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::schema::TableDef;
use crate::sql::Fields;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Every row of the table, ordered by surrogate id.
    async fn list(&self, table: &'static TableDef) -> Result<Vec<Row>, AppError>;

    async fn find(&self, table: &'static TableDef, key: &Value) -> Result<Option<Row>, AppError>;

    async fn insert(&self, table: &'static TableDef, fields: &Fields) -> Result<Row, AppError>;

    /// `None` when no row matched the key.
    async fn update(
        &self,
        table: &'static TableDef,
        key: &Value,
        fields: &Fields,
    ) -> Result<Option<Row>, AppError>;

    /// Returns the deleted row, `None` when no row matched the key.
    async fn delete(&self, table: &'static TableDef, key: &Value) -> Result<Option<Row>, AppError>;

    /// Connectivity check used by the readiness route.
    async fn ping(&self) -> Result<(), AppError>;
}
