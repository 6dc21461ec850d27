//! Observability for Courier: tracing subscriber initialization.

pub mod tracing_setup;
