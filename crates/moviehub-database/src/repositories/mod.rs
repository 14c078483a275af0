//! Repository implementations for MovieHub entities.

pub mod memory;
pub mod movie;

pub use memory::MemoryMovieRepository;
pub use movie::PgMovieRepository;
