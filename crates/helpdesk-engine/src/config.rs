//! Configuration types for the helpdesk.
//!
//! The config is a JSON document; every field has a default so partial
//! files are accepted.

use crate::classifier::Classifier;
use crate::responses::{ResponseTable, TableError, WELCOME_MESSAGE};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Directory holding helpdesk files, relative to the working directory.
pub const CONFIG_DIR: &str = ".helpdesk";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Colour theme for the terminal UI.
    #[serde(default)]
    pub theme: ThemeChoice,

    /// UI tick interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Fixed seed for reply selection (random when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// First assistant message of every conversation.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,

    /// Response table.
    #[serde(default)]
    pub responses: ResponseTable,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_welcome_message() -> String {
    WELCOME_MESSAGE.into()
}

/// Available colour themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    /// Dark theme.
    #[default]
    Mocha,
    /// Light theme.
    Latte,
    /// High contrast theme.
    HighContrast,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Default config path below a base directory.
    pub fn default_path(base: &Path) -> std::path::PathBuf {
        base.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Check the response table and welcome message.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.welcome_message.trim().is_empty() {
            return Err(ConfigError::EmptyWelcome);
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        self.responses.validate()?;
        Ok(())
    }

    /// Build a classifier from this config, honouring the seed.
    pub fn classifier(&self) -> Result<Classifier, TableError> {
        match self.seed {
            Some(seed) => Classifier::seeded(self.responses.clone(), seed),
            None => Classifier::new(self.responses.clone()),
        }
    }

    /// Start a new session from this config.
    pub fn session(&self) -> Result<Session, ConfigError> {
        self.validate()?;
        let classifier = self.classifier()?;
        Ok(Session::with_welcome(
            classifier,
            self.welcome_message.clone(),
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            tick_rate_ms: default_tick_rate_ms(),
            seed: None,
            welcome_message: default_welcome_message(),
            responses: ResponseTable::builtin(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response table breaks an invariant.
    #[error("Invalid response table: {0}")]
    InvalidTable(#[from] TableError),

    /// The welcome message is blank.
    #[error("Welcome message must not be empty")]
    EmptyWelcome,

    /// The UI tick interval is zero.
    #[error("tick_rate_ms must be at least 1")]
    ZeroTickRate,
}
