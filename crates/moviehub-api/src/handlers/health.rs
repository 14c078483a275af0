//! Health check handler.

use axum::Json;
use axum::extract::State;

use moviehub_core::error::AppError;

use crate::dto::response::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let reachable = state.movie_service.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Store health check failed");
        false
    });
    if !reachable {
        return Err(AppError::service_unavailable("Movie store is unreachable").into());
    }

    Ok(Json(HealthResponse {
        status: "UP".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
