//! HTTP/REST API layer for Courier.
//!
//! Axum-based REST API under `/api/` with a uniform
//! `{status, data | error}` envelope and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
