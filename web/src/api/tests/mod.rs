use crate::{app, config::EnvConfig, state::SharedState, test_app};
use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use libtowns::LocationStore;
use serde_json::{Value, json};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use test_log::test;
use tower::Service;


/// Sends a request to the app and returns the response status along with the
/// body parsed as json
async fn send(
    app: &mut Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };
    read_response(app, request).await
}

async fn read_response(app: &mut Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.as_service().call(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    tracing::debug!("body = {:?}", std::str::from_utf8(&bytes));
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_health(pool: Pool<Sqlite>) {
    let mut app = test_app(pool);
    let (status, body) = send(&mut app, Method::GET, "/health", None)
        .await
        .expect("Failed to execute request");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_request_id_propagated(pool: Pool<Sqlite>) {
    let mut app = test_app(pool);
    let req = Request::builder()
        .uri("/api/locations")
        .method(Method::GET)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app
        .as_service()
        .call(req)
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_unknown_route(pool: Pool<Sqlite>) {
    let mut app = test_app(pool);
    let req = Request::builder()
        .uri("/api/towns")
        .method(Method::GET)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app
        .as_service()
        .call(req)
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Builds an app around a store that fails every operation
fn failing_app() -> Router {
    store_app(
        Arc::new(location::FailingStore),
        EnvConfig::new("unused.sqlite".to_string()),
    )
}

fn store_app(store: Arc<dyn LocationStore>, config: EnvConfig) -> Router {
    app(Arc::new(SharedState::new(store, config)))
}
