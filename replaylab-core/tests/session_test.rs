//! End-to-end session tests: provider -> indicators -> session -> detector.

use chrono::{TimeZone, Utc};
use replaylab_core::data::{MarketDataProvider, SyntheticProvider};
use replaylab_core::domain::{Bar, Timeframe, TradeSide};
use replaylab_core::indicators::enrich;
use replaylab_core::rng::{StartPolicy, MIN_START_INDEX, PLAYBACK_RUNWAY};
use replaylab_core::session::{PracticeSession, Step, STARTING_CAPITAL};
use replaylab_core::signals::ThreeElements;

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
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

#[test]
fn seeded_session_from_synthetic_provider() {
    let provider = SyntheticProvider::new(7);
    let session = PracticeSession::from_provider(
        &provider,
        "BTC/USDT",
        Timeframe::Day1,
        400,
        &StartPolicy::Seeded { master_seed: 42 },
    )
    .unwrap();

    assert!(session.cursor() >= MIN_START_INDEX);
    assert!(session.cursor() <= 400 - PLAYBACK_RUNWAY);
    // The slow RSI is warm at every legal start cursor.
    assert!(session.snapshot().rsi_slow.is_some());
}

#[test]
fn same_seed_reproduces_the_same_run() {
    let provider = SyntheticProvider::new(7);
    let policy = StartPolicy::Seeded { master_seed: 42 };
    let a = PracticeSession::from_provider(&provider, "BTC/USDT", Timeframe::Day1, 400, &policy)
        .unwrap();
    let b = PracticeSession::from_provider(&provider, "BTC/USDT", Timeframe::Day1, 400, &policy)
        .unwrap();
    assert_eq!(a.cursor(), b.cursor());
    assert_eq!(a.snapshot().close, b.snapshot().close);
}

#[test]
fn full_playthrough_accounting() {
    // Deterministic script over a known price path.
    let closes = [50.0, 55.0, 60.0, 58.0, 62.0, 64.0];
    let series = enrich(bars_from_closes(&closes)).unwrap();
    let mut session = PracticeSession::new(
        "BTC/USDT",
        Timeframe::Day1,
        series,
        &StartPolicy::Fixed { index: 0 },
    )
    .unwrap();

    session.buy().unwrap(); // 20 units at 50
    session.hold().unwrap(); // reveal 60
    session.sell().unwrap(); // 20 * 60 = 1200
    assert_eq!(session.cash_balance(), 1200.0);

    session.buy().unwrap(); // 1200 / 58 units at 58
    let report = loop {
        match session.hold() {
            Ok(Step::Advanced) => continue,
            Ok(Step::Ended(report)) => break report,
            Err(e) => panic!("unexpected error: {e}"),
        }
    };

    let quantity = 1200.0 / 58.0;
    let expected_final = quantity * 64.0;
    assert!((report.final_value - expected_final).abs() < 1e-9);
    assert!(
        (report.total_return_pct
            - (expected_final - STARTING_CAPITAL) / STARTING_CAPITAL * 100.0)
            .abs()
            < 1e-9
    );
    assert_eq!(report.trades.len(), 3);
    assert_eq!(session.marks().len(), 3);
    assert_eq!(session.trades()[1].profit_pct, Some(20.0));
}

#[test]
fn trade_marks_follow_the_log() {
    let closes = [50.0, 55.0, 60.0, 58.0, 62.0];
    let series = enrich(bars_from_closes(&closes)).unwrap();
    let mut session = PracticeSession::new(
        "BTC/USDT",
        Timeframe::Day1,
        series,
        &StartPolicy::Fixed { index: 0 },
    )
    .unwrap();

    session.buy().unwrap();
    session.sell().unwrap();

    let marks = session.marks();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].bar_index, 0);
    assert_eq!(marks[0].side, TradeSide::Buy);
    assert_eq!(marks[1].bar_index, 1);
    assert_eq!(marks[1].side, TradeSide::Sell);
}

#[test]
fn detector_over_revealed_bars_flags_the_setup() {
    // A matching window at bars 1..=5, followed by filler so the session has
    // room. Half position of bar1 = (111 + 99) / 2 = 105.
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let raw = [
        // (open, high, low, close)
        (100.0, 101.0, 99.0, 100.0),
        (100.0, 111.0, 99.0, 110.0), // limit-up candle
        (110.0, 110.5, 106.0, 107.0),
        (107.0, 108.0, 105.5, 106.0),
        (106.0, 107.5, 105.0, 107.0),
        (106.0, 112.0, 104.0, 111.0), // engulfing candle -> match at index 5
        (111.0, 113.0, 110.0, 112.0),
        (112.0, 114.0, 111.0, 113.0),
    ];
    let bars: Vec<Bar> = raw
        .iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            timestamp: base + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect();

    let series = enrich(bars).unwrap();
    let mut session = PracticeSession::new(
        "BTC/USDT",
        Timeframe::Day1,
        series,
        &StartPolicy::Fixed { index: 4 },
    )
    .unwrap();

    let detector = ThreeElements::default();

    // Before the engulfing candle is revealed: nothing to flag.
    assert_eq!(detector.scan(session.revealed_bars()).count(), 0);

    session.hold().unwrap(); // reveal bar 5
    let matches: Vec<_> = detector.scan(session.revealed_bars()).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].index, 5);
    assert_eq!(matches[0].side, TradeSide::Buy);
}

#[test]
fn reset_switches_pair_and_timeframe_uniformly() {
    let provider = SyntheticProvider::new(3);
    let policy = StartPolicy::Seeded { master_seed: 9 };
    let mut session =
        PracticeSession::from_provider(&provider, "BTC/USDT", Timeframe::Day1, 300, &policy)
            .unwrap();

    session.buy().unwrap();
    assert!(session.holdings() > 0.0);

    // Timeframe change resets the ledger just like a pair change.
    session
        .reset(&provider, "BTC/USDT", Timeframe::Hour4, 300, &policy)
        .unwrap();
    assert_eq!(session.timeframe(), Timeframe::Hour4);
    assert_eq!(session.cash_balance(), STARTING_CAPITAL);
    assert_eq!(session.holdings(), 0.0);
    assert!(session.trades().is_empty());

    session
        .reset(&provider, "ETH/USDT", Timeframe::Hour4, 300, &policy)
        .unwrap();
    assert_eq!(session.pair(), "ETH/USDT");
    assert!(!session.is_ended());
}

#[test]
fn provider_name_is_stable() {
    assert_eq!(SyntheticProvider::new(0).name(), "synthetic");
}
