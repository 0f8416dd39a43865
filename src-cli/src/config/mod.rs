//! Configuration management: defaults, validation, loading from environment + CLI.

pub mod app_config;
pub mod defaults;
pub mod validation;

use std::collections::HashMap;
use std::path::Path;

pub use app_config::AppConfig;

/// Load .env from an explicit path, or from the first candidate that exists.
pub fn load_dotenv(explicit: Option<&Path>) -> Result<(), anyhow::Error> {
    if let Some(path) = explicit {
        dotenvy::from_path(path)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?;
        tracing::info!("Loaded .env from: {}", path.display());
        return Ok(());
    }

    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return Ok(());
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
    Ok(())
}

/// Load config with command-line `overrides` taking precedence over the environment.
pub fn load_config(overrides: &HashMap<&'static str, String>) -> Result<AppConfig, anyhow::Error> {
    AppConfig::load(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    })
}
