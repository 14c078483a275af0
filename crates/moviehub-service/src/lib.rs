//! # moviehub-service
//!
//! Business logic layer for MovieHub. Services receive the movie repository
//! as `Arc<MovieRepository>` so the same code runs against PostgreSQL and
//! the in-memory store.

pub mod movie;

pub use movie::{MovieCriteria, MovieDto, MovieQueryService, MovieService};
