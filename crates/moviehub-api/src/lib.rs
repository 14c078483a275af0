//! # moviehub-api
//!
//! HTTP API layer for MovieHub built on Axum.
//!
//! Provides the REST endpoints for the movie resource, middleware (alert
//! headers, CORS, compression, request logging), query extractors, and the
//! `ApiError` wrapper that renders domain errors as HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod headers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
