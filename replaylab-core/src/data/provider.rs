//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over candle sources (Gate.io REST,
//! synthetic data) so the session engine can swap implementations and tests
//! never touch the network. Providers are constructed explicitly and passed
//! in — there is no module-level exchange client.

use crate::domain::{Bar, Timeframe};
use thiserror::Error;

/// Structured error types for data feed operations.
///
/// A failed fetch aborts the operation that requested it; the caller must
/// never substitute stale or partial data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by exchange (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("trading pair not found: {pair}")]
    PairNotFound { pair: String },

    #[error("exchange returned no candles for {pair}")]
    EmptyResponse { pair: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for candle data providers.
///
/// `fetch` returns up to `limit` bars in ascending chronological order.
pub trait MarketDataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch OHLCV bars for a trading pair at the given timeframe.
    fn fetch(&self, pair: &str, timeframe: Timeframe, limit: usize) -> Result<Vec<Bar>, DataError>;
}
