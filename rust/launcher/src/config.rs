//! Configuration file parsing for the launcher.

use std::path::Path;

use serde::{Deserialize, Serialize};
use yarn_launch_config::{ClientSettings, ContainerResources, LayoutSettings};

/// Top-level configuration loaded from TOML.
///
/// Every table is optional; missing tables and fields fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherConfig {
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub resources: ContainerResources,
}

impl LauncherConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(String, std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
}
