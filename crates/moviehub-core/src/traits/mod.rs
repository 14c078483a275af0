//! Core traits defined in `moviehub-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
