//! Request and response DTOs that are specific to the HTTP layer.

pub mod request;
pub mod response;
