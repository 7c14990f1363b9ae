//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a table descriptor.

use crate::schema::{quoted, TableDef};
use serde_json::Value;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Column values staged for INSERT or UPDATE, in column order.
pub type Fields = Vec<(&'static str, Value)>;

/// Placeholder with cast to the column's type, e.g. `$2::date`.
fn placeholder(table: &TableDef, column: &str, n: u32) -> String {
    table
        .column(column)
        .map(|c| format!("${}::{}", n, c.kind.pg_type()))
        .unwrap_or_else(|| format!("${}", n))
}

/// SELECT list: every column, timestamps and dates as-is so the row decoder sees native types.
fn select_column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_column(table: &TableDef) -> String {
    quoted(table.key)
}

/// SELECT every row ordered by the surrogate id.
pub fn select_all(table: &TableDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    let order = table.serial_column().map(|c| c.name).unwrap_or(table.key);
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(order)
    );
    q
}

/// SELECT by lookup key.
pub fn select_by_key(table: &TableDef, key: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(key.clone());
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(table),
        quoted(table.name),
        key_column(table),
        placeholder(table, table.key, n)
    );
    q
}

/// INSERT one row. Serial columns are left to their sequence.
pub fn insert(table: &TableDef, fields: &Fields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, val) in fields {
        let Some(c) = table.column(name) else { continue };
        if c.is_serial() {
            continue;
        }
        let n = q.push_param(val.clone());
        cols.push(quoted(name));
        placeholders.push(placeholder(table, name, n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(table)
    );
    q
}

/// UPDATE by key: SET only the staged columns. Callers reject an empty set before building.
pub fn update(table: &TableDef, key: &Value, fields: &Fields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (name, val) in fields {
        let Some(c) = table.column(name) else { continue };
        if c.is_serial() {
            continue;
        }
        let n = q.push_param(val.clone());
        sets.push(format!("{} = {}", quoted(name), placeholder(table, name, n)));
    }
    let key_n = q.push_param(key.clone());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(table.name),
        sets.join(", "),
        key_column(table),
        placeholder(table, table.key, key_n),
        select_column_list(table)
    );
    q
}

/// DELETE by key, returning the removed row.
pub fn delete(table: &TableDef, key: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(key.clone());
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        quoted(table.name),
        key_column(table),
        placeholder(table, table.key, n),
        select_column_list(table)
    );
    q
}
