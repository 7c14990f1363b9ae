//! Validation helpers and typed CRUD over the store.

mod crud;
pub mod validation;
pub use crud::CrudService;
