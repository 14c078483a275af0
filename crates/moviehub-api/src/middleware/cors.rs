//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use moviehub_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// The alert headers of `application_name` are exposed in addition to the
/// configured ones so browser clients can read them.
pub fn build_cors_layer(config: &CorsConfig, application_name: &str) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    if config.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        layer = layer.allow_headers(headers);
    }

    let alert_headers = ["alert", "error", "params"]
        .iter()
        .map(|suffix| format!("x-{application_name}-{suffix}"));
    let exposed: Vec<HeaderName> = config
        .exposed_headers
        .iter()
        .cloned()
        .chain(alert_headers)
        .filter_map(|h| h.parse().ok())
        .collect();
    layer = layer.expose_headers(exposed);

    layer.max_age(Duration::from_secs(config.max_age_seconds))
}
