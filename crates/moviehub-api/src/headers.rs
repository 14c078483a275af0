//! Alert and pagination response headers.
//!
//! Handlers and the error mapper attach a [`HeaderAlert`] to the response
//! extensions; the `alert_headers` middleware turns it into
//! `X-{application}-alert` / `-error` / `-params` headers, since only it knows
//! the configured application name.

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, LINK};
use axum::http::Uri;

use moviehub_core::types::PageResponse;

/// Total number of matching rows across all pages.
pub const X_TOTAL_COUNT: &str = "x-total-count";

/// Entity lifecycle action announced by a success alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    /// Entity was created.
    Created,
    /// Entity was updated.
    Updated,
    /// Entity was deleted.
    Deleted,
}

impl EntityAction {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// An alert to be rendered into response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderAlert {
    /// A write succeeded.
    Success {
        /// Entity name, e.g. `movies`.
        entity_name: String,
        /// What happened.
        action: EntityAction,
        /// Parameter for the message, usually the identifier.
        param: String,
    },
    /// A request was rejected.
    Failure {
        /// Entity name, e.g. `movies`.
        entity_name: String,
        /// Error key, e.g. `idnull`.
        error_key: String,
    },
}

impl HeaderAlert {
    /// Success alert for an entity action.
    pub fn entity(entity_name: &str, action: EntityAction, param: impl ToString) -> Self {
        Self::Success {
            entity_name: entity_name.to_string(),
            action,
            param: param.to_string(),
        }
    }

    /// Write the alert headers for `application_name` into `headers`.
    pub fn apply(&self, application_name: &str, headers: &mut HeaderMap) {
        match self {
            Self::Success {
                entity_name,
                action,
                param,
            } => {
                let message = format!("{application_name}.{entity_name}.{}", action.as_str());
                insert(headers, &format!("x-{application_name}-alert"), &message);
                insert(headers, &format!("x-{application_name}-params"), param);
            }
            Self::Failure {
                entity_name,
                error_key,
            } => {
                insert(
                    headers,
                    &format!("x-{application_name}-error"),
                    &format!("error.{error_key}"),
                );
                insert(headers, &format!("x-{application_name}-params"), entity_name);
            }
        }
    }
}

fn insert(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::try_from(name),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!(header = name, "Skipping alert header that is not valid HTTP"),
    }
}

/// `X-Total-Count` and RFC 5988 `Link` headers for a page of results.
///
/// Links keep every query parameter of `uri` except `page` and `size`.
pub fn pagination_headers<T>(uri: &Uri, page: &PageResponse<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT, HeaderValue::from(page.total_items));

    let kept: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page=") && !pair.starts_with("size="))
        .collect();
    let link = |number: u64, rel: &str| {
        let mut query: Vec<String> = kept.iter().map(|pair| pair.to_string()).collect();
        query.push(format!("page={number}"));
        query.push(format!("size={}", page.page_size));
        format!("<{}?{}>; rel=\"{rel}\"", uri.path(), query.join("&"))
    };

    let mut links = Vec::with_capacity(4);
    if page.has_next {
        links.push(link(page.page.saturating_add(1), "next"));
    }
    if page.has_previous {
        links.push(link(page.page - 1, "prev"));
    }
    links.push(link(page.total_pages.saturating_sub(1), "last"));
    links.push(link(0, "first"));

    match HeaderValue::from_str(&links.join(",")) {
        Ok(value) => {
            headers.insert(LINK, value);
        }
        Err(e) => tracing::warn!(error = %e, "Skipping Link header"),
    }
    headers
}
