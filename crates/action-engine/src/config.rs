/*
[INPUT]:  Optional YAML configuration file
[OUTPUT]: Parsed and validated engine configuration
[POS]:    Configuration layer - timer delay, logging, and UI settings
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

const CONFIG_DIR_NAME: &str = "action-engine";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Top-level configuration for the action engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Delay between `executing` and `completed`, in milliseconds
    #[serde(default = "default_execution_delay_ms")]
    pub execution_delay_ms: u64,
    /// tracing filter directive (e.g. "info", "action_engine=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Number of log lines kept for the logs panel
    #[serde(default = "default_log_buffer_capacity")]
    pub log_buffer_capacity: usize,
    /// Terminal UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Terminal UI configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiConfig {
    /// Redraw interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Show the logs panel on startup
    #[serde(default)]
    pub show_logs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_delay_ms: default_execution_delay_ms(),
            log_level: default_log_level(),
            log_buffer_capacity: default_log_buffer_capacity(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            show_logs: false,
        }
    }
}

fn default_execution_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_buffer_capacity() -> usize {
    2000
}

fn default_tick_ms() -> u64 {
    250
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration for startup.
    ///
    /// An explicit path must exist. Without one, the per-user default path is
    /// read if present; otherwise defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/action-engine/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if self.execution_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "execution_delay_ms must be > 0".to_string(),
            ));
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Invalid("ui.tick_ms must be > 0".to_string()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn execution_delay(&self) -> Duration {
        Duration::from_millis(self.execution_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms)
    }
}
