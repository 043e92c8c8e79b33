//! Relative Strength Index (RSI), simple-average variant.
//!
//! Average gain and average loss are plain arithmetic means over the trailing
//! `period` close-to-close changes (no Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//!
//! Division edge cases are explicit branches, never NaN:
//! avg_loss == 0 && avg_gain > 0 → 100; avg_gain == 0 && avg_loss > 0 → 0;
//! both zero (fully flat window) → 50.

use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Compute RSI for every bar; None until `period` changes exist, so the
    /// first defined value sits at index `period`.
    pub fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let n = bars.len();
        let mut result = vec![None; n];

        if n < self.period + 1 {
            return result;
        }

        let changes: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();

        for i in self.period..n {
            // changes[j] is the move into bar j+1; the window ending at bar i
            // covers changes[i - period .. i].
            let window = &changes[i - self.period..i];
            let mut gain_sum = 0.0;
            let mut loss_sum = 0.0;
            for &ch in window {
                if ch > 0.0 {
                    gain_sum += ch;
                } else {
                    loss_sum -= ch;
                }
            }
            let avg_gain = gain_sum / self.period as f64;
            let avg_loss = loss_sum / self.period as f64;

            result[i] = Some(rsi_value(avg_gain, avg_loss));
        }

        result
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // flat window, no movement either way
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
