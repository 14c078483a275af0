//! # moviehub-core
//!
//! Core crate for MovieHub. Contains the store trait, configuration schemas,
//! filter value objects, the generic specification (predicate) model,
//! pagination/sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other MovieHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
