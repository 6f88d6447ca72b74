use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::batch::BatchConfig;
use crate::figma::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::generator::GenerationOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Defaults for every run, read from TOML.
///
/// ```toml
/// [generation]
/// include_types = true
/// use_style_sheet = true
///
/// [batch]
/// concurrency = 3
/// delay = "1s"
///
/// [figma]
/// base_url = "https://api.figma.com"
/// timeout = "30s"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub generation: GenerationOptions,
    pub batch: BatchConfig,
    pub figma: FigmaConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigmaConfig {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// `~/.config/f2rn/config.toml`, if a home directory is known.
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join("f2rn").join("config.toml"))
    }

    /// Explicit path > central config (when present) > defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::central_config_path().filter(|p| p.is_file()) {
                Some(central) => Self::from_file(&central),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "batch.concurrency must be at least 1".to_string(),
            ));
        }
        if self.figma.timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "figma.timeout must be greater than zero".to_string(),
            ));
        }
        Url::parse(&self.figma.base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "figma.base_url '{}' is not a valid URL: {}",
                self.figma.base_url, e
            ))
        })?;
        Ok(())
    }
}
