//! Coffee-specific endpoints.

use crate::error::AppError;
use crate::models::CoffeeType;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::State, Json};

/// Every coffee type name, in id order.
pub async fn coffee_type_names(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let types = CrudService::list::<CoffeeType>(state.store.as_ref()).await?;
    Ok(Json(types.into_iter().map(|t| t.kind).collect()))
}
