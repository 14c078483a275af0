//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use moviehub_core::config::AppConfig;
use moviehub_database::MovieRepository;
use moviehub_service::{MovieQueryService, MovieService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Movie CRUD service
    pub movie_service: Arc<MovieService>,
    /// Criteria-driven movie queries
    pub movie_query_service: Arc<MovieQueryService>,
}

impl AppState {
    /// Wire the services over one movie repository.
    pub fn new(config: AppConfig, repo: Arc<MovieRepository>) -> Self {
        Self {
            config: Arc::new(config),
            movie_service: Arc::new(MovieService::new(Arc::clone(&repo))),
            movie_query_service: Arc::new(MovieQueryService::new(repo)),
        }
    }

    /// Prefix of the alert headers (`X-{name}-alert`).
    pub fn application_name(&self) -> &str {
        &self.config.server.application_name
    }
}
