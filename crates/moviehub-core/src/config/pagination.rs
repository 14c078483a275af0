//! Pagination limits.

use serde::{Deserialize, Serialize};

use crate::types::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Page size bounds applied to list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request has no `size` parameter.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound for the `size` parameter.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u64 {
    MAX_PAGE_SIZE
}
