//! Request and response types of the HTTP API.

pub mod auth;
pub mod company;
pub mod envelope;
pub mod faculty;
pub mod health;
pub mod institution;
pub mod job;
pub mod status;
pub mod validation;

pub use envelope::ApiResponse;
pub use status::StatusUpdateRequest;
