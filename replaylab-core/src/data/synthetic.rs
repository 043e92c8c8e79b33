//! Synthetic candle provider — deterministic random-walk data.
//!
//! Used for offline runs, demos, and tests. Bars are generated from a seeded
//! StdRng so the same (seed, pair, timeframe, limit) always produces the same
//! series; the pair name is folded into the seed so different pairs get
//! different walks.

use super::provider::{DataError, MarketDataProvider};
use crate::domain::{Bar, Timeframe};
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic random-walk data provider.
pub struct SyntheticProvider {
    seed: u64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn series_seed(&self, pair: &str, timeframe: Timeframe) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(pair.as_bytes());
        hasher.update(timeframe.as_str().as_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }
}

impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, pair: &str, timeframe: Timeframe, limit: usize) -> Result<Vec<Bar>, DataError> {
        if limit == 0 {
            return Err(DataError::EmptyResponse {
                pair: pair.to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.series_seed(pair, timeframe));
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let step = timeframe.bar_duration();

        let mut bars = Vec::with_capacity(limit);
        let mut price: f64 = 100.0;

        for i in 0..limit {
            // Mostly small moves with an occasional strong up bar, so setup
            // patterns actually occur in generated data.
            let pct: f64 = if rng.gen_bool(0.04) {
                rng.gen_range(0.09..0.15)
            } else {
                rng.gen_range(-0.03..0.03)
            };

            let open = price;
            let close = (open * (1.0 + pct)).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(100.0..10_000.0);

            bars.push(Bar {
                timestamp: start + step * i as i32,
                open,
                high,
                low,
                close,
                volume,
            });
            price = close;
        }

        Ok(bars)
    }
}
