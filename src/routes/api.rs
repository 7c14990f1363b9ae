//! `/api/v1` resource routes. Everything except the root message and the student listing
//! sits behind the bearer gate.

use crate::auth::require_bearer;
use crate::handlers::{coffee_type_names, create, delete, list, read, update};
use crate::models::{Book, CoffeeOrder, CoffeeType, Resource, Student};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Static API banner; served without a token.
pub(crate) async fn root() -> Json<Value> {
    Json(json!({ "message": "Student API2" }))
}

fn resource<T: Resource>(router: Router<AppState>, path: &str) -> Router<AppState> {
    router
        .route(path, get(list::<T>).post(create::<T>))
        .route(
            &format!("{}/:id", path),
            get(read::<T>).patch(update::<T>).delete(delete::<T>),
        )
}

pub fn api_routes(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), require_bearer);

    let mut gated = Router::new()
        .route(
            "/student/:id",
            get(read::<Student>)
                .patch(update::<Student>)
                .delete(delete::<Student>),
        )
        .route("/getcoffeetype", get(coffee_type_names));
    gated = resource::<Book>(gated, "/books");
    gated = resource::<CoffeeType>(gated, "/typecoffee");
    gated = resource::<CoffeeOrder>(gated, "/coffee");

    Router::new()
        .route("/", get(root))
        .route(
            "/student",
            get(list::<Student>).merge(post(create::<Student>).route_layer(auth.clone())),
        )
        .merge(gated.route_layer(auth))
        .with_state(state)
}
