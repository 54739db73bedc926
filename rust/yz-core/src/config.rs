//! Game configuration (YAML).
//!
//! Every field has a default, so an empty document is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Advice endpoint and scheduling.
    #[serde(default)]
    pub advice: AdviceConfig,
    /// Rules-adjacent settings.
    #[serde(default)]
    pub game: GameConfig,
    /// Presentation loop settings.
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdviceConfig {
    /// GET endpoint returning `{"slip": {"advice": "..."}}`.
    #[serde(default = "default_advice_url")]
    pub url: String,
    /// Network timeout for one fetch.
    #[serde(default = "default_advice_timeout_ms")]
    pub timeout_ms: u64,
    /// Time after a roll before the first fetch of that turn.
    #[serde(default = "default_advice_delay_ms")]
    pub delay_ms: u64,
    /// Minimum time between two fetches.
    #[serde(default = "default_advice_interval_ms")]
    pub interval_ms: u64,
    /// Text shown when a fetch fails for any reason.
    #[serde(default = "default_advice_fallback")]
    pub fallback: String,
}

fn default_advice_url() -> String {
    "https://api.adviceslip.com/advice".to_string()
}

fn default_advice_timeout_ms() -> u64 {
    3000
}

fn default_advice_delay_ms() -> u64 {
    5000
}

fn default_advice_interval_ms() -> u64 {
    10_000
}

fn default_advice_fallback() -> String {
    "Time to make a move! (Network or Data Error)".to_string()
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            url: default_advice_url(),
            timeout_ms: default_advice_timeout_ms(),
            delay_ms: default_advice_delay_ms(),
            interval_ms: default_advice_interval_ms(),
            fallback: default_advice_fallback(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameConfig {
    /// Maximum player name length, in characters.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
    /// Dice seed. If None, seeded from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_name_len() -> usize {
    15
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiConfig {
    /// Frame interval; the engine is ticked once per frame.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    16
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.advice.url.trim().is_empty() {
            return invalid("advice.url must be non-empty");
        }
        if self.advice.timeout_ms < 1 {
            return invalid("advice.timeout_ms must be >= 1");
        }
        if self.advice.interval_ms < 1 {
            return invalid("advice.interval_ms must be >= 1");
        }
        if self.game.max_name_len < 1 {
            return invalid("game.max_name_len must be >= 1");
        }
        if self.ui.tick_ms < 1 {
            return invalid("ui.tick_ms must be >= 1");
        }
        Ok(())
    }
}
