//! Series validation — the indicator engine refuses degenerate input.

use super::Bar;
use thiserror::Error;

/// Why a fetched bar series cannot be used.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,

    #[error("timestamps not strictly increasing at index {index}")]
    NonMonotonic { index: usize },
}

/// Check that a series is non-empty and chronologically ordered.
///
/// Ordering must be strict: duplicate timestamps indicate a feed problem and
/// are rejected rather than silently deduplicated.
pub fn validate_bars(bars: &[Bar]) -> Result<(), SeriesError> {
    if bars.is_empty() {
        return Err(SeriesError::Empty);
    }
    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(SeriesError::NonMonotonic { index: i + 1 });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bar_at(hour: u32) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, hour, 0, 0).unwrap(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 10.0,
        }
    }

    #[test]
    fn empty_series_rejected() {
        assert!(matches!(validate_bars(&[]), Err(SeriesError::Empty)));
    }

    #[test]
    fn ordered_series_accepted() {
        let bars = vec![bar_at(0), bar_at(1), bar_at(2)];
        assert!(validate_bars(&bars).is_ok());
    }

    #[test]
    fn duplicate_timestamp_rejected() {
        let bars = vec![bar_at(0), bar_at(1), bar_at(1)];
        match validate_bars(&bars) {
            Err(SeriesError::NonMonotonic { index }) => assert_eq!(index, 2),
            other => panic!("expected NonMonotonic, got {other:?}"),
        }
    }

    #[test]
    fn out_of_order_rejected() {
        let bars = vec![bar_at(2), bar_at(1)];
        assert!(matches!(
            validate_bars(&bars),
            Err(SeriesError::NonMonotonic { index: 1 })
        ));
    }
}
