//! Message pipeline and repository trait definitions for Courier.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, plus the content filter, processor and service that make
//! up the message pipeline. It depends only on `courier-types` -- never on
//! `courier-infra` or any database/IO crate.

pub mod message;
pub mod repository;
pub mod service;
