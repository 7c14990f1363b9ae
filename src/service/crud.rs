//! Typed CRUD over the store handle: one store call per operation.

use crate::error::AppError;
use crate::models::Resource;
use crate::sql::Fields;
use crate::store::{Row, Store};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct CrudService;

impl CrudService {
    /// Full table scan; no filtering or pagination.
    pub async fn list<T: Resource>(store: &dyn Store) -> Result<Vec<T>, AppError> {
        store
            .list(T::table())
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn get<T: Resource>(store: &dyn Store, key: &Value) -> Result<T, AppError> {
        let row = store
            .find(T::table(), key)
            .await?
            .ok_or_else(|| AppError::NotFound(T::NOT_FOUND.into()))?;
        decode(row)
    }

    pub async fn create<T: Resource>(store: &dyn Store, fields: &Fields) -> Result<T, AppError> {
        decode(store.insert(T::table(), fields).await?)
    }

    /// Apply staged fields to the row matching `key`. An empty set is rejected before the store is touched.
    pub async fn update<T: Resource>(
        store: &dyn Store,
        key: &Value,
        fields: &Fields,
    ) -> Result<T, AppError> {
        if fields.is_empty() {
            return Err(AppError::Validation("No valid fields to update".into()));
        }
        let row = store
            .update(T::table(), key, fields)
            .await?
            .ok_or_else(|| AppError::NotFound(T::NOT_FOUND.into()))?;
        decode(row)
    }

    pub async fn delete<T: Resource>(store: &dyn Store, key: &Value) -> Result<T, AppError> {
        let row = store
            .delete(T::table(), key)
            .await?
            .ok_or_else(|| AppError::NotFound(T::NOT_FOUND.into()))?;
        decode(row)
    }
}

fn decode<T: DeserializeOwned>(row: Row) -> Result<T, AppError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}
