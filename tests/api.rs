//! End-to-end route tests against the in-memory store.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use campus_api::schema::{BOOKS, COFFEE_ORDERS, COFFEE_TYPES, STUDENTS};
use campus_api::{app, ApiConfig, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "test-secret";

fn setup() -> (Router, Arc<MemoryStore>) {
    setup_with(&[])
}

/// Router over a fresh store; `extra` adds environment entries besides the secret.
fn setup_with(extra: &[(&str, &str)]) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = ApiConfig::from_lookup(|k: &str| {
        if k == "API_SECRET" {
            return Some(SECRET.to_string());
        }
        extra.iter().find(|(name, _)| *name == k).map(|(_, v)| v.to_string())
    })
    .unwrap();
    let state = AppState::new(store.clone(), config);
    (app(state), store)
}

async fn send_as(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_as(app, method, uri, Some(SECRET), body).await
}

fn ada() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "studentId": "S1",
        "birthDate": "1815-12-10",
        "gender": "F"
    })
}

fn dune() -> Value {
    json!({
        "title": "Dune",
        "author": "Frank Herbert",
        "detail": "First edition",
        "synopsis": "A desert planet.",
        "type": "novel",
        "publishedAt": "1965-08-01T00:00:00Z"
    })
}

#[tokio::test]
async fn root_message_is_public() {
    let (app, _) = setup();
    for uri in ["/api/v1", "/api/v1/"] {
        let (status, body) = send_as(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!({"message": "Student API2"}));
    }
}

#[tokio::test]
async fn student_create_then_get() {
    let (app, _) = setup();
    let (status, body) = send(&app, Method::POST, "/api/v1/student", Some(ada())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "success": true,
            "students": {
                "id": 1,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "studentId": "S1",
                "birthDate": "1815-12-10",
                "gender": "F"
            }
        })
    );

    let (status, fetched) = send(&app, Method::GET, "/api/v1/student/S1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body["students"]);
}

#[tokio::test]
async fn student_birth_date_is_normalized() {
    let (app, _) = setup();
    let mut input = ada();
    input["birthDate"] = json!("1815-12-10T10:00:00Z");
    let (status, body) = send(&app, Method::POST, "/api/v1/student", Some(input)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["students"]["birthDate"], json!("1815-12-10"));
}

#[tokio::test]
async fn student_listing_is_public_but_other_routes_are_gated() {
    let (app, store) = setup();
    send(&app, Method::POST, "/api/v1/student", Some(ada())).await;

    let (status, body) = send_as(&app, Method::GET, "/api/v1/student", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = send_as(&app, Method::GET, "/api/v1/student/S1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Unauthorized"}));

    let mut other = ada();
    other["studentId"] = json!("S2");
    let (status, _) = send_as(&app, Method::POST, "/api/v1/student", Some("wrong"), Some(other)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.count(&STUDENTS).await, 1);
}

#[tokio::test]
async fn gated_routes_reject_before_touching_the_store() {
    let (app, store) = setup();
    let cases = [
        (Method::GET, "/api/v1/books", None),
        (Method::POST, "/api/v1/books", Some(dune())),
        (Method::GET, "/api/v1/typecoffee/1", None),
        (Method::POST, "/api/v1/typecoffee", Some(json!({"type": "Latte"}))),
        (Method::PATCH, "/api/v1/coffee/1", Some(json!({"count": 2}))),
        (Method::DELETE, "/api/v1/student/S1", None),
        (Method::GET, "/api/v1/getcoffeetype", None),
    ];
    for (method, uri, body) in cases {
        let (status, _) = send_as(&app, method.clone(), uri, None, body.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        let (status, _) = send_as(&app, method.clone(), uri, Some("nope"), body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }
    assert_eq!(store.count(&BOOKS).await, 0);
    assert_eq!(store.count(&COFFEE_TYPES).await, 0);
}

#[tokio::test]
async fn create_with_missing_or_empty_field_is_rejected_without_insert() {
    let (app, store) = setup();

    for field in ["firstName", "lastName", "studentId", "birthDate", "gender"] {
        let mut body = ada();
        body.as_object_mut().unwrap().remove(field);
        let (status, err) = send(&app, Method::POST, "/api/v1/student", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {}", field);
        assert!(err["error"].as_str().unwrap().starts_with(field));
    }
    let mut blank = ada();
    blank["gender"] = json!("   ");
    let (status, _) = send(&app, Method::POST, "/api/v1/student", Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count(&STUDENTS).await, 0);

    for field in ["title", "author", "detail", "synopsis", "type", "publishedAt"] {
        let mut body = dune();
        body[field] = json!("");
        let (status, err) = send(&app, Method::POST, "/api/v1/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "empty {}", field);
        assert!(err["error"].as_str().unwrap().starts_with(field));
    }
    assert_eq!(store.count(&BOOKS).await, 0);

    let (status, _) = send(&app, Method::POST, "/api/v1/typecoffee", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count(&COFFEE_TYPES).await, 0);

    let (status, err) = send(
        &app,
        Method::POST,
        "/api/v1/coffee",
        Some(json!({"typecoffee_id": 1, "description": "oat", "customer_name": "Grace"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err, json!({"error": "count must be an integer"}));
    assert_eq!(store.count(&COFFEE_ORDERS).await, 0);
}

#[tokio::test]
async fn create_rejects_non_object_bodies() {
    let (app, store) = setup();
    let (status, body) = send(&app, Method::POST, "/api/v1/typecoffee", Some(json!(["Latte"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(store.count(&COFFEE_TYPES).await, 0);
}

#[tokio::test]
async fn patch_unknown_id_is_404_and_mutates_nothing() {
    let (app, store) = setup();
    send(&app, Method::POST, "/api/v1/student", Some(ada())).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/student/NOPE",
        Some(json!({"firstName": "Augusta"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Student not found"}));

    let (_, fetched) = send(&app, Method::GET, "/api/v1/student/S1", None).await;
    assert_eq!(fetched["firstName"], json!("Ada"));
    assert_eq!(store.count(&STUDENTS).await, 1);

    let (status, _) = send(&app, Method::PATCH, "/api/v1/books/42", Some(json!({"title": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_with_nothing_valid_is_400() {
    let (app, _) = setup();
    send(&app, Method::POST, "/api/v1/student", Some(ada())).await;

    for body in [json!({}), json!({"firstName": "", "lastName": 7, "unknown": "x"})] {
        let (status, err) = send(&app, Method::PATCH, "/api/v1/student/S1", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err, json!({"error": "No valid fields to update"}));
    }

    let (_, fetched) = send(&app, Method::GET, "/api/v1/student/S1", None).await;
    assert_eq!(fetched["lastName"], json!("Lovelace"));
}

#[tokio::test]
async fn patch_applies_only_valid_fields() {
    let (app, _) = setup();
    send(&app, Method::POST, "/api/v1/student", Some(ada())).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/student/S1",
        Some(json!({"firstName": "Augusta", "lastName": "", "birthDate": "1815-12-11"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["student"]["firstName"], json!("Augusta"));
    assert_eq!(body["student"]["lastName"], json!("Lovelace"));
    assert_eq!(body["student"]["birthDate"], json!("1815-12-11"));
}

#[tokio::test]
async fn patch_with_unparseable_date_is_400() {
    let (app, _) = setup();
    send(&app, Method::POST, "/api/v1/student", Some(ada())).await;
    let (status, err) = send(
        &app,
        Method::PATCH,
        "/api/v1/student/S1",
        Some(json!({"firstName": "Augusta", "birthDate": "someday"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err, json!({"error": "birthDate must be a valid date (YYYY-MM-DD)"}));

    let (_, fetched) = send(&app, Method::GET, "/api/v1/student/S1", None).await;
    assert_eq!(fetched["firstName"], json!("Ada"));
}

#[tokio::test]
async fn delete_twice_returns_row_then_404() {
    let (app, store) = setup();
    send(&app, Method::POST, "/api/v1/typecoffee", Some(json!({"type": "Latte"}))).await;

    let (status, body) = send(&app, Method::DELETE, "/api/v1/typecoffee/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "typecoffee": {"id": 1, "type": "Latte"}}));
    assert_eq!(store.count(&COFFEE_TYPES).await, 0);

    let (status, body) = send(&app, Method::DELETE, "/api/v1/typecoffee/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Coffee type not found"}));
}

#[tokio::test]
async fn student_delete_uses_students_key() {
    let (app, _) = setup();
    send(&app, Method::POST, "/api/v1/student", Some(ada())).await;
    let (status, body) = send(&app, Method::DELETE, "/api/v1/student/S1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["students"]["studentId"], json!("S1"));
    let (status, _) = send(&app, Method::GET, "/api/v1/student/S1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_ids_are_400() {
    let (app, _) = setup();
    for (method, uri) in [
        (Method::GET, "/api/v1/books/abc"),
        (Method::DELETE, "/api/v1/typecoffee/1.5"),
        (Method::GET, "/api/v1/coffee/x"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body, json!({"error": "Invalid id"}));
    }
}

#[tokio::test]
async fn book_lifecycle() {
    let (app, _) = setup();
    let (status, body) = send(&app, Method::POST, "/api/v1/books", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);
    let book = &body["book"];
    assert_eq!(book["id"], json!(1));
    assert_eq!(book["type"], json!("novel"));
    let published: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(book["publishedAt"].clone()).unwrap();
    assert_eq!(published.to_rfc3339(), "1965-08-01T00:00:00+00:00");

    let (status, fetched) = send(&app, Method::GET, "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched, book);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/books/1",
        Some(json!({"synopsis": "Spice and sandworms."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["synopsis"], json!("Spice and sandworms."));
    assert_eq!(body["book"]["title"], json!("Dune"));

    let (status, list) = send(&app, Method::GET, "/api/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn coffee_type_lifecycle() {
    let (app, _) = setup();
    let (status, body) = send(&app, Method::POST, "/api/v1/typecoffee", Some(json!({"type": "Latte"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"success": true, "typecoffee": {"id": 1, "type": "Latte"}}));

    let (status, fetched) = send(&app, Method::GET, "/api/v1/typecoffee/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body["typecoffee"]);

    let (status, body) = send(&app, Method::PATCH, "/api/v1/typecoffee/1", Some(json!({"type": "Flat white"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "typecoffee": {"id": 1, "type": "Flat white"}}));

    let (_, fetched) = send(&app, Method::GET, "/api/v1/typecoffee/1", None).await;
    assert_eq!(fetched["type"], json!("Flat white"));
}

#[tokio::test]
async fn whole_floats_count_as_integers() {
    let (app, _) = setup();
    send(&app, Method::POST, "/api/v1/typecoffee", Some(json!({"type": "Latte"}))).await;
    let order = json!({
        "typecoffee_id": 1.0,
        "count": 2.0,
        "description": "large",
        "customer_name": "Grace"
    });
    let (status, body) = send(&app, Method::POST, "/api/v1/coffee", Some(order)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["coffee"]["count"], json!(2));
    assert_eq!(body["coffee"]["typecoffee_id"], json!(1));

    let (status, _) = send(&app, Method::PATCH, "/api/v1/coffee/1", Some(json!({"count": 2.5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn body_rejections_keep_their_status() {
    let (app, store) = setup_with(&[("BODY_LIMIT_BYTES", "64")]);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/typecoffee")
        .header(header::AUTHORIZATION, format!("Bearer {}", SECRET))
        .body(Body::from(r#"{"type": "Latte"}"#))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());

    let long = "x".repeat(256);
    let (status, body) = send(&app, Method::POST, "/api/v1/typecoffee", Some(json!({"type": long}))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
    assert_eq!(store.count(&COFFEE_TYPES).await, 0);
}

#[tokio::test]
async fn coffee_orders_and_type_names() {
    let (app, _) = setup();
    for kind in ["Latte", "Espresso"] {
        let (status, _) = send(&app, Method::POST, "/api/v1/typecoffee", Some(json!({"type": kind}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, names) = send(&app, Method::GET, "/api/v1/getcoffeetype", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names, json!(["Latte", "Espresso"]));

    let order = json!({
        "typecoffee_id": 2,
        "count": 3,
        "description": "double shot",
        "customer_name": "Grace"
    });
    let (status, body) = send(&app, Method::POST, "/api/v1/coffee", Some(order.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let mut expected = order;
    expected["id"] = json!(1);
    assert_eq!(body, json!({"success": true, "coffee": expected}));

    let (status, fetched) = send(&app, Method::GET, "/api/v1/coffee/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, expected);

    let (status, _) = send(&app, Method::PATCH, "/api/v1/coffee/1", Some(json!({"count": "four"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_constraint_failures_surface_as_500() {
    let (app, store) = setup();
    let order = json!({
        "typecoffee_id": 99,
        "count": 1,
        "description": "ghost",
        "customer_name": "Nobody"
    });
    let (status, body) = send(&app, Method::POST, "/api/v1/coffee", Some(order)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Server Error"}));
    assert_eq!(store.count(&COFFEE_ORDERS).await, 0);

    send(&app, Method::POST, "/api/v1/student", Some(ada())).await;
    let (status, _) = send(&app, Method::POST, "/api/v1/student", Some(ada())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store.count(&STUDENTS).await, 1);
}

#[tokio::test]
async fn operational_routes_and_cors() {
    let (app, _) = setup();
    let (status, body) = send_as(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send_as(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], json!("ok"));

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/books")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
