//! Resource CRUD handlers, one generic instance per resource type.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Payload, Resource};
use crate::response::{success_created, success_ok};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

pub async fn list<T: Resource>(State(state): State<AppState>) -> Result<Json<Vec<T>>, AppError> {
    let rows = CrudService::list::<T>(state.store.as_ref()).await?;
    Ok(Json(rows))
}

pub async fn read<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, AppError> {
    let key = T::parse_key(&id)?;
    let row = CrudService::get::<T>(state.store.as_ref(), &key).await?;
    Ok(Json(row))
}

pub async fn create<T: Resource>(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let fields = T::New::from_body(&body)?.into_fields();
    let row = CrudService::create::<T>(state.store.as_ref(), &fields).await?;
    tracing::info!(table = T::table().name, "created row");
    Ok(success_created(T::KEYS.created, &row)?)
}

pub async fn update<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let key = T::parse_key(&id)?;
    let fields = T::Patch::from_body(&body)?.into_fields();
    let row = CrudService::update::<T>(state.store.as_ref(), &key, &fields).await?;
    Ok(success_ok(T::KEYS.updated, &row)?)
}

pub async fn delete<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let key = T::parse_key(&id)?;
    let row = CrudService::delete::<T>(state.store.as_ref(), &key).await?;
    tracing::info!(table = T::table().name, key = %key, "deleted row");
    Ok(success_ok(T::KEYS.deleted, &row)?)
}
