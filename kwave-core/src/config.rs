//! TOML analysis configuration.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! [extractor]
//! low_years = 60.0
//! high_years = 40.0
//! order = 2
//! fallback_window_years = 50.0
//!
//! [resonance]
//! weight = 0.25
//!
//! [report]
//! history_months = 12
//! min_months = 12
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::signal::resonance::check_weight;
use crate::signal::{ExtractorConfig, ResonanceConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Report-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of trailing points whose phase is listed in the report.
    pub history_months: usize,
    /// Fewest monthly points a report will accept.
    pub min_months: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            history_months: 12,
            min_months: 12,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub extractor: ExtractorConfig,
    pub resonance: ResonanceConfig,
    pub report: ReportConfig,
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extractor
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        check_weight(self.resonance.weight).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.report.min_months < 2 {
            return Err(ConfigError::Invalid(format!(
                "report.min_months must be >= 2, got {}",
                self.report.min_months
            )));
        }
        Ok(())
    }
}
