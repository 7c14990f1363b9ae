//! Bearer token gate for the resource routes.

use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects with 401 unless the bearer token equals the configured secret.
/// Runs before any body extraction or store access.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    let rejection = match token {
        Some(token) if token == state.config.api_secret => None,
        Some(_) => Some("invalid bearer token"),
        None => Some("missing or malformed authorization header"),
    };
    if let Some(reason) = rejection {
        tracing::debug!(reason, "unauthorized request");
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}
