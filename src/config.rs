//! Configuration management and validation.
//!
//! Settings live in a TOML file; every key is optional and falls back to the
//! built-in default. Command line flags are applied on top by the CLI.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_MAX_GROUPS,
    DEFAULT_RAW_TEXT_COLUMN, RAW_TEXT_HEADER,
};
use crate::{MetafError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Decoder pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetafConfig {
    /// Column holding the raw report text
    pub raw_text_column: usize,

    /// Header name expected at `raw_text_column`
    pub raw_text_header: String,

    /// Compare the header at `raw_text_column` with `raw_text_header`;
    /// when off only the index is checked
    pub check_raw_text_header: bool,

    /// Reports with more groups are rejected as malformed
    pub max_groups: usize,

    /// Prepend `METAR`/`TAF` to feed reports that start with the location
    pub prefix_report_keyword: bool,

    /// Render the partial element list of reports that failed to decode
    pub render_failed_reports: bool,

    /// Append decoded field explanations to each description
    pub detailed: bool,

    /// Reports decoded concurrently
    pub workers: usize,

    /// Append rendered reports to this text file
    pub log_path: Option<PathBuf>,
}

impl Default for MetafConfig {
    fn default() -> Self {
        Self {
            raw_text_column: DEFAULT_RAW_TEXT_COLUMN,
            raw_text_header: RAW_TEXT_HEADER.to_string(),
            check_raw_text_header: true,
            max_groups: DEFAULT_MAX_GROUPS,
            prefix_report_keyword: true,
            render_failed_reports: true,
            detailed: false,
            workers: num_cpus::get(),
            log_path: None,
        }
    }
}

impl MetafConfig {
    /// Load configuration using the standard search order:
    /// 1. `explicit` path (errors are returned)
    /// 2. `$METAF_CONFIG` environment variable
    /// 3. `<config dir>/metaf-decoder/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => {
                        info!("Loaded config from {} ({})", path.display(), CONFIG_ENV_VAR);
                        return Ok(config);
                    }
                    Err(e) => warn!("Failed to load config from {}: {}", CONFIG_ENV_VAR, e),
                }
            } else {
                warn!(
                    "{} points to non-existent file {}, falling back",
                    CONFIG_ENV_VAR,
                    path.display()
                );
            }
        }

        if let Some(path) = Self::default_path().filter(|p| p.exists()) {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    return Ok(config);
                }
                Err(e) => warn!("Failed to load {}: {}, using defaults", path.display(), e),
            }
        }

        debug!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Platform config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load and validate a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MetafError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents).map_err(|source| MetafError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Header name the feed parser checks, if the check is enabled
    pub fn expected_header(&self) -> Option<&str> {
        self.check_raw_text_header.then_some(self.raw_text_header.as_str())
    }

    /// Serialize the current config to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MetafError::configuration(format!("cannot serialize config: {}", e)))
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_groups == 0 {
            return Err(MetafError::configuration("max_groups must be greater than 0"));
        }

        if self.workers == 0 {
            return Err(MetafError::configuration("workers must be greater than 0"));
        }

        if self.check_raw_text_header && self.raw_text_header.trim().is_empty() {
            return Err(MetafError::configuration(
                "raw_text_header must not be empty while check_raw_text_header is on",
            ));
        }

        Ok(())
    }
}
