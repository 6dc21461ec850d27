//! Request parsing helpers for the message endpoints.

pub mod query;
