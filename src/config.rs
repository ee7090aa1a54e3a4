use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::{CleanerError, Result};
use crate::pipeline::pipeline_config::SchemaVariant;

/// Top-level configuration, usually read from `config.toml`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output schema variant (and the merge policy that goes with it)
    pub variant: SchemaVariant,
    /// Emit a progress line every N input rows
    pub progress_interval: usize,
    pub columns: ColumnsConfig,
    pub logging: LoggingConfig,
}

/// Column naming conventions of the input export
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub first_name: String,
    pub last_name: String,
    pub timestamp: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub profile_url: String,
    pub phone_markers: Vec<String>,
    pub email_marker: String,
    pub dnc_suffix: String,
    pub skip_markers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    pub file_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: SchemaVariant::Profile,
            progress_interval: constants::DEFAULT_PROGRESS_INTERVAL,
            columns: ColumnsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            first_name: constants::FIRST_NAME_COLUMN.to_string(),
            last_name: constants::LAST_NAME_COLUMN.to_string(),
            timestamp: constants::TIMESTAMP_COLUMN.to_string(),
            address: constants::ADDRESS_COLUMN.to_string(),
            city: constants::CITY_COLUMN.to_string(),
            state: constants::STATE_COLUMN.to_string(),
            zip: constants::ZIP_COLUMN.to_string(),
            profile_url: constants::PROFILE_URL_COLUMN.to_string(),
            phone_markers: owned(constants::PHONE_MARKERS),
            email_marker: constants::EMAIL_MARKER.to_string(),
            dnc_suffix: constants::DNC_SUFFIX.to_string(),
            skip_markers: owned(constants::SKIP_MARKERS),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
            file_prefix: "pixel_cleaner.log".to_string(),
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CleanerError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use built-in defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(CleanerError::Config(
                "progress_interval must be greater than zero".to_string(),
            ));
        }
        self.columns.validate()
    }
}

impl ColumnsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(CleanerError::Config(
                "identity columns (first_name, last_name) must be set".to_string(),
            ));
        }
        if self.first_name.trim().eq_ignore_ascii_case(self.last_name.trim()) {
            return Err(CleanerError::Config(format!(
                "first_name and last_name must name different columns (both '{}')",
                self.first_name
            )));
        }
        if self.dnc_suffix.trim().is_empty() {
            return Err(CleanerError::Config("dnc_suffix must not be empty".to_string()));
        }
        if self.email_marker.trim().is_empty() {
            return Err(CleanerError::Config("email_marker must not be empty".to_string()));
        }
        Ok(())
    }
}
