//! REST API layer for HTTP request/response handling.
//!
//! # Modules
//!
//! - [`dto`] - request bodies, query parameters and the success envelope
//! - [`extract`] - extractors reporting rejections in the failure envelope
//! - [`handlers`] - HTTP request handlers, one module per resource group
//! - [`middleware`] - authentication, rate limiting and tracing
//! - [`routes`] - route tables

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
