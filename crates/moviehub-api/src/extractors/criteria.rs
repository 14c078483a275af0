//! Binds `field.operator=value` query parameters into movie criteria.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use moviehub_core::error::AppError;
use moviehub_service::MovieCriteria;

use crate::error::ApiError;

/// Movie criteria parsed from the query string.
///
/// Parameters that name no movie field (`page`, `sort`, ...) are ignored.
/// An operator that the field's filter does not support, or a value that
/// does not parse, rejects the request with 400.
#[derive(Debug, Clone, Default)]
pub struct CriteriaQuery(pub MovieCriteria);

impl<S> FromRequestParts<S> for CriteriaQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::validation(format!("Invalid query string: {e}")))?;

        let mut criteria = MovieCriteria::new();
        for (key, value) in &pairs {
            criteria.apply_param(key, value)?;
        }
        Ok(Self(criteria))
    }
}
