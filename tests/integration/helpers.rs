//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use moviehub_api::{AppState, build_app};
use moviehub_core::config::AppConfig;
use moviehub_database::repositories::MemoryMovieRepository;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application over an empty in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();

        let state = AppState::new(config.clone(), Arc::new(MemoryMovieRepository::new()));
        let router = build_app(state);

        Self { router, config }
    }

    /// Create a movie through the API and return its id
    pub async fn create_movie(
        &self,
        name: Option<&str>,
        category: Option<&str>,
        rating: Option<f64>,
    ) -> i64 {
        let body = serde_json::json!({
            "name": name,
            "category": category,
            "rating": rating,
        });
        let response = self.request("POST", "/api/movies", Some(body)).await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );

        response
            .body
            .get("id")
            .and_then(Value::as_i64)
            .expect("No id in create response")
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request_with_type(method, path, body, "application/json")
            .await
    }

    /// Make a request with an explicit content type
    pub async fn request_with_type(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        content_type: &str,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when empty or not JSON)
    pub body: Value,
}

impl TestResponse {
    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Ids of a JSON array body
    pub fn ids(&self) -> Vec<i64> {
        self.body
            .as_array()
            .map(|items| items.iter().filter_map(|m| m["id"].as_i64()).collect())
            .unwrap_or_default()
    }
}
