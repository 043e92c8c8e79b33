//! Practice session: the paper-trading state machine and its final report.

pub mod engine;
pub mod report;

pub use engine::{InfoSnapshot, PracticeSession, Step, DISPLAY_WINDOW, STARTING_CAPITAL};
pub use report::FinalReport;

use crate::data::DataError;
use crate::domain::SeriesError;
use thiserror::Error;

/// Errors surfaced by session operations.
///
/// Rejected actions (`InsufficientFunds`, `InsufficientHoldings`, `Ended`)
/// leave the session untouched and recoverable; data and series errors abort
/// the operation that needed fresh data while preserving prior state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("data feed error: {0}")]
    Data(#[from] DataError),

    #[error("bad series: {0}")]
    Series(#[from] SeriesError),

    #[error("buy rejected: cash balance is zero")]
    InsufficientFunds,

    #[error("sell rejected: no holdings")]
    InsufficientHoldings,

    #[error("session already ended — reset to start a new run")]
    Ended,

    #[error("not enough bars for a practice run: need at least {need}, got {got}")]
    InsufficientHistory { need: usize, got: usize },
}
