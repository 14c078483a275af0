//! Movie domain entities.

pub mod column;
pub mod model;

pub use column::MovieColumn;
pub use model::Movie;
