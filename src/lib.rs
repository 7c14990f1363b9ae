//! Campus API: CRUD over students, books, coffee types and coffee orders on PostgreSQL,
//! gated by a static bearer token.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ApiConfig;
pub use error::{AppError, ConfigError};
pub use routes::{app, api_routes, common_routes, API_BASE};
pub use schema::ensure_tables;
pub use service::CrudService;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
