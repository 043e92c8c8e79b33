//! Final report computed when a session turns terminal.

use crate::domain::TradeRecord;
use serde::Serialize;

/// Outcome of a finished practice run.
///
/// `final_value` marks any open position to the last revealed close;
/// `total_return_pct` is measured against the fixed starting capital. How
/// the report is rendered is the presentation layer's business.
#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub final_value: f64,
    pub total_return_pct: f64,
    pub last_price: f64,
    pub holdings: f64,
    pub cash: f64,
    pub trades: Vec<TradeRecord>,
}
