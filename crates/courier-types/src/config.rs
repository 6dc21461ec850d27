//! Service configuration types for Courier.
//!
//! `ServiceConfig` represents the `courier.toml` file. It is loaded once at
//! process start and handed to each component's constructor; nothing reads
//! configuration from a global.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for the Courier service.
///
/// All fields have sensible defaults, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Path of the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Words masked out of message content (case-insensitive, whole word).
    #[serde(default = "default_forbidden_words")]
    pub forbidden_words: Vec<String>,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Limits applied to session history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Built-in forbidden word list.
pub const DEFAULT_FORBIDDEN_WORDS: &[&str] = &[
    "idiota", "estupido", "imbecil", "maldito", "carajo", "mierda", "puta", "bastardo", "pendejo",
    "cabron",
];

fn default_app_name() -> String {
    "Courier Message API".to_string()
}

fn default_database_path() -> String {
    "messages.db".to_string()
}

fn default_forbidden_words() -> Vec<String> {
    DEFAULT_FORBIDDEN_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_limit() -> u32 {
    50
}

fn default_max_limit() -> u32 {
    100
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            database_path: default_database_path(),
            forbidden_words: default_forbidden_words(),
            pagination: PaginationConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit == 0 {
            return Err(ConfigError::ZeroMaxLimit);
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::DefaultLimitOutOfRange {
                default_limit: self.default_limit,
                max_limit: self.max_limit,
            });
        }
        Ok(())
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pagination.validate()
    }
}
