//! HTTP handlers: generic resource CRUD plus the few resource-specific endpoints.

pub mod coffee;
pub mod resource;
pub use coffee::coffee_type_names;
pub use resource::{create, delete, list, read, update};
