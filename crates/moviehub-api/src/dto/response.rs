//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"UP"` when the store is reachable.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// HTTP reason phrase or error summary.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Translation key (`error.idexists`, `error.http.404`, ...).
    pub message: String,
    /// Human-readable detail.
    pub detail: String,
    /// Entity the request targeted, for entity alerts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Machine-readable error key, for entity alerts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,
    /// Alert parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}
