mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the probe configuration.
///
/// `CONFIG_PATH` names the file to read and must exist when set. Without it,
/// `config.yaml` in the working directory is used if present, otherwise the
/// built-in defaults apply.
pub async fn load() -> Result<ProbeConfig> {
    match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from(DEFAULT_CONFIG_PATH).await,
        Err(_) => {
            debug!("No configuration file found, using defaults");
            Ok(ProbeConfig::default())
        }
    }
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<ProbeConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<ProbeConfig> {
    let config: ProbeConfig = serde_yaml::from_str(config_str)?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &ProbeConfig) -> Result<()> {
    let base_url = config.base_url.trim();
    if base_url.is_empty() {
        return Err(Error::config("base_url must not be empty"));
    }
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(Error::config(format!(
            "base_url must use http or https: '{}'",
            config.base_url
        )));
    }

    if config.health_timeout_secs == 0 || config.generate_timeout_secs == 0 {
        return Err(Error::config("timeouts must be at least one second"));
    }

    if config.fixtures.is_empty() {
        return Err(Error::config("at least one fixture is required"));
    }

    if let Some(index) = config.fixtures.iter().position(|f| f.theme.trim().is_empty()) {
        return Err(Error::config(format!(
            "fixture {} has an empty theme",
            index + 1
        )));
    }

    Ok(())
}
