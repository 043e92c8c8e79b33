//! Trade records and chart marks produced by a practice session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a practice trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Single-letter chart annotation used by the presentation layer.
    pub fn mark_letter(self) -> char {
        match self {
            TradeSide::Buy => 'B',
            TradeSide::Sell => 'S',
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

/// One executed practice trade, immutable once logged.
///
/// `profit_pct` is populated for sells only and is measured against the fixed
/// starting capital, not the cost basis of the position being closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub side: TradeSide,
    pub bar_index: usize,
    pub price: f64,
    pub quantity: f64,
    pub profit_pct: Option<f64>,
}

/// Chart annotation: which bar to mark and with which side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeMark {
    pub bar_index: usize,
    pub side: TradeSide,
}
