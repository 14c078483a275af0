//! HTTP error type wrapping the domain `AppError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use moviehub_core::error::{AppError, ErrorKind};

use crate::dto::response::ApiErrorResponse;
use crate::headers::HeaderAlert;

/// Handler and extractor error. Wraps [`AppError`] so it can be rendered as
/// an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(err) = self;
        let status = match err.kind {
            ErrorKind::BadRequest | ErrorKind::Validation | ErrorKind::Serialization => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Database | ErrorKind::Internal | ErrorKind::Configuration => {
                tracing::error!(error = %err, source = ?err.source, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let title = status.canonical_reason().unwrap_or("Error").to_string();
        let detail = if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            "Internal server error".to_string()
        } else {
            err.message.clone()
        };

        let body = match &err.alert {
            Some(alert) => ApiErrorResponse {
                title: err.message.clone(),
                status: status.as_u16(),
                message: format!("error.{}", alert.error_key),
                detail,
                entity_name: Some(alert.entity_name.clone()),
                error_key: Some(alert.error_key.clone()),
                params: Some(alert.entity_name.clone()),
            },
            None => ApiErrorResponse {
                title,
                status: status.as_u16(),
                message: format!("error.http.{}", status.as_u16()),
                detail,
                entity_name: None,
                error_key: None,
                params: None,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(alert) = err.alert {
            response.extensions_mut().insert(HeaderAlert::Failure {
                entity_name: alert.entity_name,
                error_key: alert.error_key,
            });
        }
        response
    }
}
