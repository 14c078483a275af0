//! Axum middleware stack.

pub mod alert;
pub mod compression;
pub mod cors;
pub mod logging;
