//! Timeframe — candle interval for data fetches and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Candle interval supported by the data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1h")]
    Hour1,
}

impl Timeframe {
    /// Exchange-facing interval string.
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Day1 => "1d",
            Timeframe::Hour4 => "4h",
            Timeframe::Hour1 => "1h",
        }
    }

    /// Duration of one bar at this timeframe.
    pub fn bar_duration(self) -> chrono::Duration {
        match self {
            Timeframe::Day1 => chrono::Duration::days(1),
            Timeframe::Hour4 => chrono::Duration::hours(4),
            Timeframe::Hour1 => chrono::Duration::hours(1),
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Day1
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown timeframe '{0}' (expected 1d, 4h, or 1h)")]
pub struct ParseTimeframeError(String);

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Timeframe::Day1),
            "4h" => Ok(Timeframe::Hour4),
            "1h" => Ok(Timeframe::Hour1),
            other => Err(ParseTimeframeError(other.to_string())),
        }
    }
}
