//! PostgreSQL store: one parameterized statement per call.

use super::{Row, Store};
use crate::error::AppError;
use crate::schema::{ColumnKind, TableDef};
use crate::sql::{self, Fields, PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_optional(&self, table: &TableDef, q: &QueryBuf) -> Result<Option<Row>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.map(|r| row_to_json(table, &r)).transpose()
    }

    async fn fetch_all(&self, table: &TableDef, q: &QueryBuf) -> Result<Vec<Row>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(|r| row_to_json(table, r)).collect()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list(&self, table: &'static TableDef) -> Result<Vec<Row>, AppError> {
        self.fetch_all(table, &sql::select_all(table)).await
    }

    async fn find(&self, table: &'static TableDef, key: &Value) -> Result<Option<Row>, AppError> {
        self.fetch_optional(table, &sql::select_by_key(table, key)).await
    }

    async fn insert(&self, table: &'static TableDef, fields: &Fields) -> Result<Row, AppError> {
        self.fetch_optional(table, &sql::insert(table, fields))
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update(
        &self,
        table: &'static TableDef,
        key: &Value,
        fields: &Fields,
    ) -> Result<Option<Row>, AppError> {
        self.fetch_optional(table, &sql::update(table, key, fields)).await
    }

    async fn delete(&self, table: &'static TableDef, key: &Value) -> Result<Option<Row>, AppError> {
        self.fetch_optional(table, &sql::delete(table, key)).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_json(table: &TableDef, row: &PgRow) -> Result<Row, AppError> {
    let mut map = Row::new();
    for col in table.columns {
        map.insert(col.name.to_string(), cell_to_value(row, col.name, col.kind)?);
    }
    Ok(map)
}

/// Decode one column by its declared kind. SQL NULL becomes JSON null; a type mismatch is an error.
fn cell_to_value(row: &PgRow, name: &str, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    use sqlx::Row as _;
    let value = match kind {
        ColumnKind::Serial | ColumnKind::BigInt => row.try_get::<Option<i64>, _>(name)?.map(Value::from),
        ColumnKind::Int => row.try_get::<Option<i32>, _>(name)?.map(Value::from),
        ColumnKind::Text => row.try_get::<Option<String>, _>(name)?.map(Value::String),
        ColumnKind::Date => row
            .try_get::<Option<chrono::NaiveDate>, _>(name)?
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string())),
        ColumnKind::Timestamp => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)?
            .map(|d| Value::String(d.to_rfc3339())),
    };
    Ok(value.unwrap_or(Value::Null))
}
