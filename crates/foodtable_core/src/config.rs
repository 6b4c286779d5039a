//! Application configuration.
//!
//! # Responsibility
//! - Load page length, logging settings and seed rows from JSON.
//! - Provide defaults that reproduce the demo table.
//!
//! # Invariants
//! - A validated config has `page_length >= 1`.
//! - `log_dir`, when set, is an absolute path.
//! - `log_level`, when set, names a level `init_logging` accepts.

use crate::logging::{check_log_dir, parse_level, LogLevel};
use crate::model::food::{FoodData, FoodValidationError};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_PAGE_LENGTH: usize = 10;

/// Errors raised while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
    Seed {
        index: usize,
        source: FoodValidationError,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
            Self::Seed { index, source } => write!(f, "invalid seed row {index}: {source}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
            Self::Seed { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Process configuration for the food table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Rows per view.
    pub page_length: usize,
    /// Log level; `None` uses the build-mode default.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
    /// Rows inserted before the store is handed out.
    pub seed: Vec<FoodData>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            log_level: None,
            log_dir: None,
            seed: demo_seed(),
        }
    }
}

impl AppConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses and validates JSON config text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_length == 0 {
            return Err(ConfigError::Invalid(
                "page_length must be at least 1".to_string(),
            ));
        }
        if let Some(level) = &self.log_level {
            parse_level(level).map_err(ConfigError::Invalid)?;
        }
        if let Some(dir) = &self.log_dir {
            check_log_dir(dir).map_err(ConfigError::Invalid)?;
        }
        for (index, row) in self.seed.iter().enumerate() {
            row.validate()
                .map_err(|source| ConfigError::Seed { index, source })?;
        }
        Ok(())
    }

    /// Configured log level, or the build-mode default when unset.
    ///
    /// # Errors
    /// - `Invalid` when `log_level` names an unknown level.
    pub fn effective_log_level(&self) -> Result<LogLevel, ConfigError> {
        match &self.log_level {
            Some(level) => parse_level(level).map_err(ConfigError::Invalid),
            None => Ok(LogLevel::for_build()),
        }
    }
}

/// Demo rows: two long names, each followed by one row per letter `a..=z`.
pub fn demo_seed() -> Vec<FoodData> {
    let mut rows = Vec::with_capacity(54);
    for head in ["rohliiiii iiiiiiiiii iiiiiiiik", "rohliiiiii ooooooo iiiiiiiik"] {
        rows.push(FoodData::new(head, 8.0, 60.0, 10.0, 0.0));
        for (offset, letter) in ('a'..='z').enumerate() {
            let step = offset as f64;
            rows.push(FoodData::new(
                letter.to_string(),
                100.0 + step * 10.0,
                step,
                step * 2.0,
                step / 2.0,
            ));
        }
    }
    rows
}
