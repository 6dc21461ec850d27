//! Infrastructure layer for Courier.
//!
//! Contains implementations of the repository traits defined in `courier-core`
//! (SQLite and in-memory message storage) and the TOML configuration loader.

pub mod config;
pub mod in_memory;
pub mod sqlite;
