//! Shared domain types for Courier.
//!
//! This crate contains the core domain types used across the Courier
//! message API: incoming and processed messages, stored rows, the service
//! configuration, inbound validation, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod validation;
