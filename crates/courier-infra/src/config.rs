//! Service configuration loader.
//!
//! Reads a TOML file (`courier.toml` by default) and deserializes it into
//! [`ServiceConfig`]. Falls back to defaults when the file is missing or
//! malformed, so the service can always start.

use std::path::Path;

use courier_types::config::{PaginationConfig, ServiceConfig};

/// Load the service configuration from `path`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - If the pagination block is inconsistent (e.g. `default_limit` above
///   `max_limit`), logs a warning and replaces only that block.
pub async fn load_config(path: &Path) -> ServiceConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServiceConfig::default();
        }
    };

    let mut config = match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            return ServiceConfig::default();
        }
    };

    if let Err(err) = config.validate() {
        tracing::warn!(
            "Invalid pagination settings in {}: {err}, using default pagination",
            path.display()
        );
        config.pagination = PaginationConfig::default();
    }

    config
}
