//! # moviehub-database
//!
//! Movie store selection, SQL rendering of specifications, and the concrete
//! movie repositories (PostgreSQL and in-memory).

pub mod provider;
pub mod repositories;
pub mod sql;

pub use provider::{MovieRepository, connect_movie_repository};
