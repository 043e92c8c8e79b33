//! Limit-up pullback setup detector.
//!
//! Scans a fixed five-bar window for the sequence: a strong limit-up candle,
//! three pullback candles that never break the limit-up candle's half
//! position, and a final bullish candle engulfing the pullback range. A match
//! is reported at the index of the final candle.
//!
//! The detector reads raw OHLC only — indicator columns are irrelevant — and
//! never looks past the window, so it is safe to run incrementally as new
//! bars are revealed.

use crate::domain::{Bar, TradeSide};

/// Number of bars a window spans.
const WINDOW: usize = 5;

/// Default close/open ratio that qualifies the first candle as a limit-up
/// proxy (a 9% single-bar gain).
pub const DEFAULT_LIMIT_UP_RATIO: f64 = 1.09;

/// One detected setup: `index` is the final (engulfing) candle of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupMatch {
    pub index: usize,
    pub side: TradeSide,
}

/// Detector for the limit-up pullback setup.
///
/// Precondition: bars are sane (`Bar::is_sane`); behavior on malformed bars
/// is unspecified.
#[derive(Debug, Clone)]
pub struct ThreeElements {
    limit_up_ratio: f64,
}

impl Default for ThreeElements {
    fn default() -> Self {
        Self {
            limit_up_ratio: DEFAULT_LIMIT_UP_RATIO,
        }
    }
}

impl ThreeElements {
    pub fn new(limit_up_ratio: f64) -> Self {
        assert!(
            limit_up_ratio > 1.0,
            "limit-up ratio must exceed 1.0"
        );
        Self { limit_up_ratio }
    }

    /// Minimum bars needed before any match is possible.
    pub fn min_bars(&self) -> usize {
        WINDOW
    }

    /// Classify the window ending at `index`. Only `bars[index-4..=index]`
    /// is inspected; indices below 4 never match.
    pub fn detect(&self, bars: &[Bar], index: usize) -> Option<SetupMatch> {
        if index < WINDOW - 1 || index >= bars.len() {
            return None;
        }

        let first = &bars[index - 4];
        let pullback = &bars[index - 3..index];
        let last = &bars[index];

        // 1. Limit-up candle: close at least the ratio above open.
        if first.close <= first.open * self.limit_up_ratio {
            return None;
        }

        // 2. No pullback low may break half of the limit-up candle's range.
        let half = (first.high + first.low) / 2.0;
        if pullback.iter().any(|bar| bar.low < half) {
            return None;
        }

        // 3. Final candle is bullish and strictly engulfs the pullback range.
        let pullback_high = pullback.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let pullback_low = pullback.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        if last.close <= last.open || last.high <= pullback_high || last.low >= pullback_low {
            return None;
        }

        Some(SetupMatch {
            index,
            side: TradeSide::Buy,
        })
    }

    /// Lazily scan a series for all setups, in ascending index order.
    ///
    /// Re-scanning is side-effect-free and independent of any prior scan.
    pub fn scan<'a>(&'a self, bars: &'a [Bar]) -> Setups<'a> {
        Setups {
            detector: self,
            bars,
            next: WINDOW - 1,
        }
    }
}

/// Iterator over setup matches in a bar slice.
pub struct Setups<'a> {
    detector: &'a ThreeElements,
    bars: &'a [Bar],
    next: usize,
}

impl Iterator for Setups<'_> {
    type Item = SetupMatch;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.bars.len() {
            let index = self.next;
            self.next += 1;
            if let Some(m) = self.detector.detect(self.bars, index) {
                return Some(m);
            }
        }
        None
    }
}
