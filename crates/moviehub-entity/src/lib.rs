//! # moviehub-entity
//!
//! Domain entity models for MovieHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow` and expose a column enum that specifications are built
//! over.

pub mod movie;
