//! Deterministic start-cursor selection.
//!
//! A practice run begins at a hidden point in history so the trader cannot
//! anchor on the chart's right edge. The start index is drawn from a seeded
//! RNG: a master seed is expanded into a per-(pair, timeframe) sub-seed via
//! BLAKE3, so the same seed replays the same start for the same series while
//! different pairs land on different cursors. Tests pin the cursor with
//! `StartPolicy::Fixed`.

use crate::domain::Timeframe;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Earliest permissible start index — the slow RSI must already be defined.
pub const MIN_START_INDEX: usize = 42;

/// Bars kept in front of the start cursor so a run has room to play out.
pub const PLAYBACK_RUNWAY: usize = 100;

/// How the starting cursor of a practice session is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPolicy {
    /// Derive the cursor from a master seed and the (pair, timeframe) labels.
    Seeded { master_seed: u64 },
    /// Pin the cursor exactly (tests, replays of a known run).
    Fixed { index: usize },
}

impl StartPolicy {
    /// Derive the sub-seed for a specific (pair, timeframe).
    ///
    /// Hash-based derivation is order-independent: deriving BTC then ETH
    /// gives the same seeds as the reverse order.
    fn sub_seed(master_seed: u64, pair: &str, timeframe: Timeframe) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&master_seed.to_le_bytes());
        hasher.update(pair.as_bytes());
        hasher.update(timeframe.as_str().as_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }

    /// Pick the start cursor for a series of `len` bars.
    ///
    /// Seeded picks are uniform over `[MIN_START_INDEX, len - PLAYBACK_RUNWAY]`,
    /// collapsing to `MIN_START_INDEX` when the series is too short for a
    /// runway. The caller is responsible for rejecting series shorter than
    /// `MIN_START_INDEX + 2` before asking for a cursor.
    pub fn start_index(&self, pair: &str, timeframe: Timeframe, len: usize) -> usize {
        match *self {
            StartPolicy::Fixed { index } => index,
            StartPolicy::Seeded { master_seed } => {
                let lo = MIN_START_INDEX;
                let hi = len.saturating_sub(PLAYBACK_RUNWAY);
                if hi <= lo {
                    return lo;
                }
                let mut rng =
                    StdRng::seed_from_u64(Self::sub_seed(master_seed, pair, timeframe));
                rng.gen_range(lo..=hi)
            }
        }
    }
}
