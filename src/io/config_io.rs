use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read intake.toml from the given directory. A missing file yields the
/// default config.
pub fn read_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join("intake.toml");
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}
