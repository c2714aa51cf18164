#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use jobq_core::ports::FixedClock;
use jobq_core::{LeaseConfig, LifecycleEngine};
use tower::ServiceExt;

use jobq_server::config::ServerConfig;
use jobq_server::routes;
use jobq_server::state::AppState;

/// Test `ServerConfig`: loopback, ephemeral port, default timeouts.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router over a fresh engine driven by the
/// real clock.
pub fn build_test_app() -> Router {
    let config = test_config();
    let engine = Arc::new(LifecycleEngine::new(config.lease));
    routes::app(AppState::new(engine, config))
}

/// Build the router over an engine whose clock the test controls.
///
/// Returns the clock so tests can move time past the lease timeouts.
pub fn build_test_app_with_clock() -> (Router, Arc<FixedClock>) {
    let config = test_config();
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    ));
    let engine = Arc::new(LifecycleEngine::with_clock(
        LeaseConfig::from_millis(60_000, 30_000),
        clock.clone(),
    ));
    (routes::app(AppState::new(engine, config)), clock)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// GET with a `QUEUE_CONSUMER` header.
pub async fn get_as(app: &Router, uri: &str, consumer: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("QUEUE_CONSUMER", consumer)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Enqueue a TIME_CRITICAL job and return its id.
pub async fn enqueue(app: &Router) -> u64 {
    let response = post_json(
        app,
        "/jobs/enqueue",
        serde_json::json!({"Type": "TIME_CRITICAL", "Status": "QUEUED"}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["id"].as_u64().unwrap()
}
