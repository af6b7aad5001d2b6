//! Shared helpers for the integration test suite.
//!
//! Tests drive the full production router (same middleware stack as
//! `main.rs`) via `tower::ServiceExt::oneshot`. The sink is disabled
//! by default so no database is required; tests that exercise the
//! sink boundary inject a deterministic double.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use briq_api::config::ServerConfig;
use briq_api::router::build_app_router;
use briq_api::state::AppState;
use briq_core::sink::AnnotationSink;

/// Build a test `ServerConfig` with safe defaults and a fixed
/// identifier scheme (`DWC`, pad 3, 20 rows per briquette).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// The production router with the sink disabled.
pub fn build_test_app() -> Router {
    build_app_with_sink(None)
}

/// The production router with an injected sink double.
pub fn build_app_with_sink(sink: Option<Arc<dyn AnnotationSink>>) -> Router {
    let config = test_config();
    let mut state = AppState::without_sink(config.clone());
    state.sink = sink;
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a CSV file as a single-field multipart upload.
pub async fn upload_csv(app: Router, uri: &str, csv: &str) -> Response<Body> {
    const BOUNDARY: &str = "briq-test-boundary";
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"sensors.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// A standard four-row, two-signal upload used across the suite.
/// Rows at t = 0, 10, 20, 30; two rows per briquette when uploaded
/// with `group_size=2`.
pub const SAMPLE_CSV: &str = "timestamp,Power,Temp,Operator\n\
                              0:00,1.0,20.0,alice\n\
                              0:10,2.0,21.0,alice\n\
                              0:20,3.0,22.0,bob\n\
                              0:30,4.0,23.0,bob";

/// Upload [`SAMPLE_CSV`] with two rows per briquette and return the
/// new session's id.
pub async fn create_sample_session(app: &Router) -> String {
    let response = upload_csv(app.clone(), "/api/v1/sessions?group_size=2", SAMPLE_CSV).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}
