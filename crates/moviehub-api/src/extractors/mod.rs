//! Custom Axum extractors.

pub mod criteria;
pub mod pagination;

pub use criteria::CriteriaQuery;
pub use pagination::Pageable;
