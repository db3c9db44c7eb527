//! Configuration schema definitions and loading.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! a working configuration.

mod bridge;
mod commands;
mod error;
mod general;
mod session;

use std::{fs, path::Path};

pub use bridge::BridgeConfig;
pub use commands::CommandsConfig;
pub use error::ConfigError;
pub use general::{GeneralConfig, LogLevel};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
pub use session::SessionConfig;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NowPlayingConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Audio session settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Asynchronous handler bridge settings.
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Remote command configuration values.
    #[serde(default)]
    pub commands: CommandsConfig,
}

impl NowPlayingConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file can't be read, or
    /// `ConfigError::TomlParse` if its content is invalid
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::toml_parse(e, Some(path)))
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    /// Returns `ConfigError::TomlParse` if the content is invalid
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::toml_parse(e, None))
    }

    /// JSON schema describing the configuration file
    pub fn json_schema() -> Schema {
        schema_for!(NowPlayingConfig)
    }
}

#[cfg(test)]
mod tests;
