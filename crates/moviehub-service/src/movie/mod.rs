//! Movie criteria, transfer object, query and CRUD services.

pub mod criteria;
pub mod dto;
pub mod query;
pub mod service;

pub use criteria::MovieCriteria;
pub use dto::MovieDto;
pub use query::MovieQueryService;
pub use service::MovieService;
