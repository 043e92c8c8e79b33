//! Indicator engine: Bollinger Bands and dual-length RSI.
//!
//! Columns are precomputed once per series via [`enrich`] and exposed through
//! per-bar [`IndicatorRow`] views. Warm-up values are `None`, never NaN.

pub mod bollinger;
pub mod enrich;
pub mod rsi;

pub use bollinger::{Bollinger, BollingerPoint};
pub use enrich::{
    enrich, EnrichedSeries, IndicatorRow, BOLLINGER_MULTIPLIER, BOLLINGER_PERIOD, RSI_FAST_PERIOD,
    RSI_SLOW_PERIOD,
};
pub use rsi::Rsi;

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLCV: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0, volume 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use chrono::{TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            crate::domain::Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
