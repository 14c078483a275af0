//! Pagination query parameter extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use moviehub_core::error::AppError;
use moviehub_core::types::{PageRequest, SortField};

use crate::error::ApiError;
use crate::state::AppState;

/// `page` (0-based), `size` and repeated `sort=property[,asc|desc]`
/// parameters, bounded by the configured page sizes.
#[derive(Debug, Clone)]
pub struct Pageable(pub PageRequest);

impl FromRequestParts<AppState> for Pageable {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::validation(format!("Invalid query string: {e}")))?;

        let limits = &state.config.pagination;
        let mut page = 0;
        let mut size = limits.default_page_size;
        let mut sort = Vec::new();

        for (key, value) in &pairs {
            match key.as_str() {
                "page" => page = parse_number("page", value)?,
                "size" => size = parse_number("size", value)?,
                "sort" => sort.extend(SortField::parse_param(value)),
                _ => {}
            }
        }

        let size = size.clamp(1, limits.max_page_size.max(1));
        if page > PageRequest::last_addressable_page(size) {
            return Err(AppError::validation(format!(
                "Page {page} is out of range for page size {size}"
            ))
            .into());
        }
        Ok(Self(PageRequest { page, size, sort }))
    }
}

fn parse_number(name: &str, raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid value '{raw}' for '{name}'")))
}
