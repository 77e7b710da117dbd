//! Trainer configuration.
//!
//! Controls where scenario data is loaded from and how quiz rounds are
//! drawn. Loadable from JSON; every field has a default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{Category, DEFAULT_MODE};

/// Default location of the scenario data file.
pub const DEFAULT_DATA_PATH: &str = "data/range_data.json";

/// Configuration for a quiz session.
///
/// # Example
/// ```
/// use gto_range_trainer::config::TrainerConfig;
/// use gto_range_trainer::data::Category;
///
/// let config = TrainerConfig::default()
///     .with_category(Category::BbDefense)
///     .with_borderline(true)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Path of the scenario data file (JSON or JS-embedded JSON).
    pub data_path: String,

    /// Data mode, e.g. "cash" or "tournament".
    pub mode: String,

    /// Scenario category to quiz.
    pub category: Category,

    /// Bias sampling toward borderline cells.
    ///
    /// Falls back to uniform sampling when a scenario has no
    /// borderline cells.
    pub borderline: bool,

    /// Random seed for reproducible sessions.
    ///
    /// If `None`, the session seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            mode: DEFAULT_MODE.to_string(),
            category: Category::Rfi,
            borderline: false,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Create a new TrainerConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the data file path.
    pub fn with_data_path(mut self, path: &str) -> Self {
        self.data_path = path.to_string();
        self
    }

    /// Builder method: set the data mode.
    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = mode.to_string();
        self
    }

    /// Builder method: set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Builder method: enable or disable borderline sampling.
    pub fn with_borderline(mut self, enable: bool) -> Self {
        self.borderline = enable;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "mode".to_string(),
                message: "Mode must not be empty".to_string(),
            });
        }
        if self.data_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data_path".to_string(),
                message: "Data path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    IoError(String),
    /// The file is not valid configuration JSON.
    #[error("Parse error: {0}")]
    ParseError(String),
    /// A field has an unusable value.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// What is wrong.
        message: String,
    },
}
