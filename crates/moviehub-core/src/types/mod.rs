//! Core type definitions used across the MovieHub workspace.

pub mod filter;
pub mod pagination;
pub mod sorting;
pub mod specification;

pub use filter::{
    BooleanFilter, DoubleFilter, Filter, FilterLiteral, FilterOp, FilterValue, LongFilter,
    QueryFilter, RangeFilter, StringFilter,
};
pub use pagination::{PageRequest, PageResponse};
pub use sorting::{SortDirection, SortField};
pub use specification::{MatchMode, Predicate, Record, Specification};
