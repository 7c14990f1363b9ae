//! In-process store used by the tests. Mirrors the constraints the PostgreSQL tables enforce.

use super::{Row, Store};
use crate::error::AppError;
use crate::schema::{TableDef, ALL_TABLES};
use crate::sql::Fields;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct TableData {
    last_id: i64,
    rows: Vec<Row>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, TableData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held for `table`.
    pub async fn count(&self, table: &TableDef) -> usize {
        self.tables
            .read()
            .await
            .get(table.name)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }
}

fn key_matches(table: &TableDef, row: &Row, key: &Value) -> bool {
    row.get(table.key) == Some(key)
}

/// Reject values that would break a unique column or a foreign-key reference.
fn check_constraints(
    tables: &HashMap<&'static str, TableData>,
    table: &TableDef,
    candidate: &Row,
    skip_index: Option<usize>,
) -> Result<(), AppError> {
    for col in table.columns {
        let Some(value) = candidate.get(col.name) else { continue };
        if col.unique {
            let clash = tables.get(table.name).map_or(false, |t| {
                t.rows
                    .iter()
                    .enumerate()
                    .any(|(i, r)| Some(i) != skip_index && r.get(col.name) == Some(value))
            });
            if clash {
                return Err(AppError::Store(format!(
                    "duplicate key value violates unique constraint on {}.{}",
                    table.name, col.name
                )));
            }
        }
        if let Some((ref_table, ref_col)) = col.references {
            let found = tables
                .get(ref_table)
                .map_or(false, |t| t.rows.iter().any(|r| r.get(ref_col) == Some(value)));
            if !found {
                return Err(AppError::Store(format!(
                    "insert or update on {} violates foreign key {} -> {}.{}",
                    table.name, col.name, ref_table, ref_col
                )));
            }
        }
    }
    Ok(())
}

/// Reject deleting a row that another table still references.
fn check_not_referenced(
    tables: &HashMap<&'static str, TableData>,
    table: &TableDef,
    row: &Row,
) -> Result<(), AppError> {
    for other in ALL_TABLES {
        for col in other.columns {
            let Some((ref_table, ref_col)) = col.references else { continue };
            if ref_table != table.name {
                continue;
            }
            let target = row.get(ref_col);
            let referenced = tables
                .get(other.name)
                .map_or(false, |t| t.rows.iter().any(|r| r.get(col.name) == target));
            if referenced {
                return Err(AppError::Store(format!(
                    "delete on {} violates foreign key from {}.{}",
                    table.name, other.name, col.name
                )));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn list(&self, table: &'static TableDef) -> Result<Vec<Row>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.get(table.name).map(|t| t.rows.clone()).unwrap_or_default())
    }

    async fn find(&self, table: &'static TableDef, key: &Value) -> Result<Option<Row>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table.name)
            .and_then(|t| t.rows.iter().find(|r| key_matches(table, r, key)).cloned()))
    }

    async fn insert(&self, table: &'static TableDef, fields: &Fields) -> Result<Row, AppError> {
        let mut tables = self.tables.write().await;
        let mut row = Row::new();
        for col in table.columns {
            if col.is_serial() {
                continue;
            }
            let value = fields
                .iter()
                .find(|(name, _)| *name == col.name)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| {
                    AppError::Store(format!(
                        "null value in column {} of {} violates not-null constraint",
                        col.name, table.name
                    ))
                })?;
            row.insert(col.name.to_string(), value);
        }
        check_constraints(&tables, table, &row, None)?;

        let data = tables.entry(table.name).or_default();
        data.last_id += 1;
        let mut out = Row::new();
        for col in table.columns {
            let value = if col.is_serial() {
                Value::from(data.last_id)
            } else {
                row.remove(col.name).unwrap_or(Value::Null)
            };
            out.insert(col.name.to_string(), value);
        }
        data.rows.push(out.clone());
        Ok(out)
    }

    async fn update(
        &self,
        table: &'static TableDef,
        key: &Value,
        fields: &Fields,
    ) -> Result<Option<Row>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .get(table.name)
            .and_then(|t| t.rows.iter().position(|r| key_matches(table, r, key)))
        else {
            return Ok(None);
        };
        let mut updated = tables[table.name].rows[index].clone();
        for (name, value) in fields {
            if table.column(name).map_or(false, |c| !c.is_serial()) {
                updated.insert(name.to_string(), value.clone());
            }
        }
        check_constraints(&tables, table, &updated, Some(index))?;
        if let Some(data) = tables.get_mut(table.name) {
            data.rows[index] = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn delete(&self, table: &'static TableDef, key: &Value) -> Result<Option<Row>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .get(table.name)
            .and_then(|t| t.rows.iter().position(|r| key_matches(table, r, key)))
        else {
            return Ok(None);
        };
        check_not_referenced(&tables, table, &tables[table.name].rows[index])?;
        Ok(tables.get_mut(table.name).map(|t| t.rows.remove(index)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
