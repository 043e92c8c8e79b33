//! Bollinger Bands — rolling mean of closes ± a standard deviation multiple.
//!
//! Uses the sample standard deviation (n − 1 divisor) over the trailing
//! window. Values are None until a full window of closes exists.

use crate::domain::Bar;

/// All band values at one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerPoint {
    pub middle: f64,
    pub std_dev: f64,
    pub upper: f64,
    pub lower: f64,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        Self { period, multiplier }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Compute band values for every bar; None during warm-up.
    pub fn compute(&self, bars: &[Bar]) -> Vec<Option<BollingerPoint>> {
        let n = bars.len();
        let mut result = vec![None; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &bars[i + 1 - self.period..=i];

            let sum: f64 = window.iter().map(|bar| bar.close).sum();
            let mean = sum / self.period as f64;

            let sum_sq: f64 = window
                .iter()
                .map(|bar| {
                    let diff = bar.close - mean;
                    diff * diff
                })
                .sum();
            let std_dev = (sum_sq / (self.period - 1) as f64).sqrt();

            result[i] = Some(BollingerPoint {
                middle: mean,
                std_dev,
                upper: mean + self.multiplier * std_dev,
                lower: mean - self.multiplier * std_dev,
            });
        }

        result
    }
}
