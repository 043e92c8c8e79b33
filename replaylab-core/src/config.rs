//! Serializable practice configuration (TOML).

use crate::domain::Timeframe;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration for a practice run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PracticeConfig {
    /// Candidate pairs offered by the presentation layer.
    /// Kept ahead of the table section so TOML serialization stays valid.
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<String>,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Session parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default = "default_pair")]
    pub pair: String,

    #[serde(default)]
    pub timeframe: Timeframe,

    /// How many candles to request from the feed.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Master seed for the start cursor; omit for a fresh random run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Whether setup annotations are computed for display.
    #[serde(default)]
    pub detect_setups: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pair: default_pair(),
            timeframe: Timeframe::default(),
            limit: default_limit(),
            seed: None,
            detect_setups: false,
        }
    }
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            watchlist: default_watchlist(),
            session: SessionConfig::default(),
        }
    }
}

impl PracticeConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }
}

fn default_pair() -> String {
    "BTC/USDT".to_string()
}

fn default_limit() -> usize {
    200
}

fn default_watchlist() -> Vec<String> {
    [
        "BTC/USDT",
        "ETH/USDT",
        "SOL/USDT",
        "DOGE/USDT",
        "PEPE/USDT",
        "WLD/USDT",
        "ENA/USDT",
        "PEOPLE/USDT",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
