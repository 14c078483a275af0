//! Request DTOs.

use serde::Deserialize;

/// Query of `GET /api/movies/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Prefix matched against name and category.
    pub keyword: String,
}
