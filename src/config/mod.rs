mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH`, or `config.yaml` when unset.
///
/// Without an explicit `CONFIG_PATH`, a missing `config.yaml` falls back
/// to built-in defaults.
pub async fn load() -> Result<Config> {
    match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await,
        Err(_) => match load_from(DEFAULT_CONFIG_PATH).await {
            Err(crate::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "No {} found, using default configuration",
                    DEFAULT_CONFIG_PATH
                );
                Ok(Config::default())
            }
            other => other,
        },
    }
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an empty mapping.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(config_str)?;
    Ok(config)
}
