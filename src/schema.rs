//! Static table descriptors and bootstrap DDL for the four resource tables.

use crate::error::AppError;
use sqlx::PgPool;

/// Column storage kind. Drives SQL casts, DDL and row decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// `BIGSERIAL PRIMARY KEY`.
    Serial,
    Text,
    Date,
    Timestamp,
    BigInt,
    Int,
}

impl ColumnKind {
    /// PostgreSQL type used for `$n::type` casts.
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnKind::Serial | ColumnKind::BigInt => "bigint",
            ColumnKind::Text => "text",
            ColumnKind::Date => "date",
            ColumnKind::Timestamp => "timestamptz",
            ColumnKind::Int => "integer",
        }
    }
}

#[derive(Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// `VARCHAR(n)` length for text columns.
    pub max_len: Option<u32>,
    pub unique: bool,
    /// `(table, column)` this column references.
    pub references: Option<(&'static str, &'static str)>,
}

impl ColumnDef {
    const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            max_len: None,
            unique: false,
            references: None,
        }
    }

    const fn varchar(name: &'static str, len: u32) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
            max_len: Some(len),
            unique: false,
            references: None,
        }
    }

    const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some((table, column));
        self
    }

    pub fn is_serial(&self) -> bool {
        self.kind == ColumnKind::Serial
    }
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    /// Column used by get/update/delete lookups.
    pub key: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn serial_column(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.is_serial())
    }
}

pub static STUDENTS: TableDef = TableDef {
    name: "students",
    key: "studentId",
    columns: &[
        ColumnDef::new("id", ColumnKind::Serial),
        ColumnDef::varchar("firstName", 255),
        ColumnDef::varchar("lastName", 255),
        ColumnDef::varchar("studentId", 50).unique(),
        ColumnDef::new("birthDate", ColumnKind::Date),
        ColumnDef::varchar("gender", 10),
    ],
};

pub static BOOKS: TableDef = TableDef {
    name: "books",
    key: "id",
    columns: &[
        ColumnDef::new("id", ColumnKind::Serial),
        ColumnDef::varchar("title", 255),
        ColumnDef::varchar("author", 255),
        ColumnDef::new("detail", ColumnKind::Text),
        ColumnDef::new("synopsis", ColumnKind::Text),
        ColumnDef::varchar("type", 100),
        ColumnDef::new("publishedAt", ColumnKind::Timestamp),
    ],
};

pub static COFFEE_TYPES: TableDef = TableDef {
    name: "coffee_types",
    key: "id",
    columns: &[
        ColumnDef::new("id", ColumnKind::Serial),
        ColumnDef::varchar("type", 100),
    ],
};

pub static COFFEE_ORDERS: TableDef = TableDef {
    name: "coffee_orders",
    key: "id",
    columns: &[
        ColumnDef::new("id", ColumnKind::Serial),
        ColumnDef::new("typecoffee_id", ColumnKind::BigInt).references("coffee_types", "id"),
        ColumnDef::new("count", ColumnKind::Int),
        ColumnDef::new("description", ColumnKind::Text),
        ColumnDef::varchar("customer_name", 255),
    ],
};

/// Tables in dependency order (referenced tables first).
pub static ALL_TABLES: [&TableDef; 4] = [&STUDENTS, &BOOKS, &COFFEE_TYPES, &COFFEE_ORDERS];

pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `CREATE TABLE IF NOT EXISTS` for one table.
pub fn create_table_sql(table: &TableDef) -> String {
    let defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| {
            let typ = match (c.kind, c.max_len) {
                (ColumnKind::Serial, _) => return format!("{} BIGSERIAL PRIMARY KEY", quoted(c.name)),
                (ColumnKind::Text, Some(n)) => format!("VARCHAR({})", n),
                (kind, _) => kind.pg_type().to_uppercase(),
            };
            let mut def = format!("{} {} NOT NULL", quoted(c.name), typ);
            if c.unique {
                def.push_str(" UNIQUE");
            }
            if let Some((t, col)) = c.references {
                def.push_str(&format!(" REFERENCES {} ({})", quoted(t), quoted(col)));
            }
            def
        })
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        quoted(table.name),
        defs.join(",\n    ")
    )
}

/// Create the resource tables if they do not exist. Existing tables are left untouched.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for table in ALL_TABLES {
        let ddl = create_table_sql(table);
        tracing::debug!(table = table.name, "ensure table");
        sqlx::query(&ddl).execute(pool).await?;
    }
    Ok(())
}
