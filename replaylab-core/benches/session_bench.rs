//! Criterion benchmarks for ReplayLab hot paths.
//!
//! Benchmarks:
//! 1. Indicator enrichment (Bollinger + dual RSI over a full series)
//! 2. Setup detector scan
//! 3. A scripted practice session played to the end

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::{TimeZone, Utc};
use replaylab_core::domain::{Bar, Timeframe};
use replaylab_core::indicators::enrich;
use replaylab_core::rng::StartPolicy;
use replaylab_core::session::{PracticeSession, Step};
use replaylab_core::signals::ThreeElements;

fn make_bars(n: usize) -> Vec<Bar> {
    let base = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: close + 1.5,
                low: close - 1.8,
                close,
                volume: 1_000_000.0 + (i % 500) as f64,
            }
        })
        .collect()
}

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich");
    for n in [200, 1000, 5000] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| enrich(black_box(bars.clone())).unwrap());
        });
    }
    group.finish();
}

fn bench_detector_scan(c: &mut Criterion) {
    let bars = make_bars(5000);
    let detector = ThreeElements::default();
    c.bench_function("detector_scan_5000", |b| {
        b.iter(|| detector.scan(black_box(&bars)).count());
    });
}

fn bench_scripted_session(c: &mut Criterion) {
    let series = enrich(make_bars(1000)).unwrap();
    c.bench_function("session_play_to_end", |b| {
        b.iter(|| {
            let mut session = PracticeSession::new(
                "BENCH/USDT",
                Timeframe::Day1,
                series.clone(),
                &StartPolicy::Fixed { index: 42 },
            )
            .unwrap();
            let mut step = 0_usize;
            loop {
                let result = match step % 4 {
                    0 => session.buy(),
                    2 => session.sell(),
                    _ => session.hold(),
                };
                step += 1;
                match result {
                    Ok(Step::Ended(report)) => break black_box(report.final_value),
                    Ok(Step::Advanced) => continue,
                    Err(_) => {
                        // Rejected action; advance via hold.
                        match session.hold() {
                            Ok(Step::Ended(report)) => break black_box(report.final_value),
                            _ => continue,
                        }
                    }
                }
            }
        });
    });
}

criterion_group!(
    benches,
    bench_enrich,
    bench_detector_scan,
    bench_scripted_session
);
criterion_main!(benches);
