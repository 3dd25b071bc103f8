//! Configuration management for the todo widget binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable held a value outside its allowed set
    #[error("invalid value {value:?} for {key}: expected one of {expected}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Value found
        value: String,
        /// Allowed values
        expected: &'static str,
    },
}

/// How item ids are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Monotonic counter (default)
    #[default]
    Sequential,
    /// Random version 4 UUIDs
    Random,
}

impl FromStr for IdStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            _ => Err(ConfigError::InvalidValue {
                key: "TODO_ID_STRATEGY",
                value: s.to_string(),
                expected: "sequential, random",
            }),
        }
    }
}

/// How the binary prints the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Plain-text layout (default)
    #[default]
    Text,
    /// Markup
    Html,
    /// Element tree as JSON
    Json,
}

impl FromStr for RenderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "TODO_RENDER",
                value: s.to_string(),
                expected: "text, html, json",
            }),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    pub log_level: String,
    /// Id generation strategy
    pub id_strategy: IdStrategy,
    /// Descriptions present at mount, top to bottom
    pub seed: Vec<String>,
    /// Output format
    pub render: RenderMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            id_strategy: IdStrategy::default(),
            seed: Vec::new(),
            render: RenderMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable           | Default      |
    /// |--------------------|--------------|
    /// | `TODO_LOG_LEVEL`   | `info`       |
    /// | `TODO_ID_STRATEGY` | `sequential` |
    /// | `TODO_SEED`        | empty; `\|`-separated descriptions |
    /// | `TODO_RENDER`      | `text`       |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if an enumerated variable holds
    /// an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            log_level: lookup("TODO_LOG_LEVEL").unwrap_or(defaults.log_level),
            id_strategy: lookup("TODO_ID_STRATEGY")
                .map(|s| s.parse::<IdStrategy>())
                .transpose()?
                .unwrap_or(defaults.id_strategy),
            seed: lookup("TODO_SEED")
                .map(|s| {
                    s.split('|')
                        .map(str::trim)
                        .filter(|d| !d.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(defaults.seed),
            render: lookup("TODO_RENDER")
                .map(|s| s.parse::<RenderMode>())
                .transpose()?
                .unwrap_or(defaults.render),
        })
    }
}
