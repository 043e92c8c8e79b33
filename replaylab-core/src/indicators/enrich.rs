//! Enriched series — bars plus precomputed indicator columns.
//!
//! All indicator columns are computed once, up front, over the full series,
//! then handed out as per-bar views. Warm-up rows are None so an undefined
//! value can never be mistaken for a real reading.

use super::bollinger::{Bollinger, BollingerPoint};
use super::rsi::Rsi;
use crate::domain::{validate_bars, Bar, SeriesError};

/// Bollinger window length.
pub const BOLLINGER_PERIOD: usize = 20;
/// Bollinger band width in standard deviations.
pub const BOLLINGER_MULTIPLIER: f64 = 2.0;
/// Fast RSI length.
pub const RSI_FAST_PERIOD: usize = 13;
/// Slow RSI length.
pub const RSI_SLOW_PERIOD: usize = 42;

/// Immutable bar series with indicator columns, indexed like the bars.
#[derive(Debug, Clone)]
pub struct EnrichedSeries {
    bars: Vec<Bar>,
    bollinger: Vec<Option<BollingerPoint>>,
    rsi_fast: Vec<Option<f64>>,
    rsi_slow: Vec<Option<f64>>,
}

/// Per-bar view over an EnrichedSeries.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorRow<'a> {
    pub bar: &'a Bar,
    pub bands: Option<BollingerPoint>,
    pub rsi_fast: Option<f64>,
    pub rsi_slow: Option<f64>,
}

impl EnrichedSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn bar(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn row(&self, index: usize) -> Option<IndicatorRow<'_>> {
        let bar = self.bars.get(index)?;
        Some(IndicatorRow {
            bar,
            bands: self.bollinger[index],
            rsi_fast: self.rsi_fast[index],
            rsi_slow: self.rsi_slow[index],
        })
    }
}

/// Derive indicator columns from a raw bar series.
///
/// Fails on degenerate input (empty, non-chronological); no partial series is
/// ever returned.
pub fn enrich(bars: Vec<Bar>) -> Result<EnrichedSeries, SeriesError> {
    validate_bars(&bars)?;

    let bollinger = Bollinger::new(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER).compute(&bars);
    let rsi_fast = Rsi::new(RSI_FAST_PERIOD).compute(&bars);
    let rsi_slow = Rsi::new(RSI_SLOW_PERIOD).compute(&bars);

    Ok(EnrichedSeries {
        bars,
        bollinger,
        rsi_fast,
        rsi_slow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(enrich(Vec::new()), Err(SeriesError::Empty)));
    }

    #[test]
    fn rejects_unordered_input() {
        let mut bars = make_bars(&[100.0, 101.0, 102.0]);
        bars.swap(0, 2);
        assert!(matches!(
            enrich(bars),
            Err(SeriesError::NonMonotonic { .. })
        ));
    }

    #[test]
    fn warm_up_boundaries() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let series = enrich(make_bars(&closes)).unwrap();

        let row18 = series.row(18).unwrap();
        assert!(row18.bands.is_none());
        let row19 = series.row(19).unwrap();
        assert!(row19.bands.is_some());

        assert!(series.row(12).unwrap().rsi_fast.is_none());
        assert!(series.row(13).unwrap().rsi_fast.is_some());
        assert!(series.row(41).unwrap().rsi_slow.is_none());
        assert!(series.row(42).unwrap().rsi_slow.is_some());
    }

    #[test]
    fn middle_band_is_twenty_close_mean() {
        let closes: Vec<f64> = (0..30).map(|i| 50.0 + (i as f64) * 2.0).collect();
        let series = enrich(make_bars(&closes)).unwrap();

        for i in 19..series.len() {
            let expected: f64 = closes[i + 1 - 20..=i].iter().sum::<f64>() / 20.0;
            let middle = series.row(i).unwrap().bands.unwrap().middle;
            assert_approx(middle, expected, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn constant_closes_give_rsi_50_after_warm_up() {
        let series = enrich(make_bars(&[100.0; 50])).unwrap();
        for i in 0..series.len() {
            let row = series.row(i).unwrap();
            match row.rsi_fast {
                None => assert!(i < RSI_FAST_PERIOD),
                Some(v) => assert_approx(v, 50.0, 1e-9),
            }
            match row.rsi_slow {
                None => assert!(i < RSI_SLOW_PERIOD),
                Some(v) => assert_approx(v, 50.0, 1e-9),
            }
        }
    }

    #[test]
    fn row_out_of_range_is_none() {
        let series = enrich(make_bars(&[100.0, 101.0])).unwrap();
        assert!(series.row(2).is_none());
    }

    #[test]
    fn input_bars_are_preserved() {
        let bars = make_bars(&[100.0, 101.0, 99.5]);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let series = enrich(bars).unwrap();
        let round_trip: Vec<f64> = series.bars().iter().map(|b| b.close).collect();
        assert_eq!(closes, round_trip);
    }
}
