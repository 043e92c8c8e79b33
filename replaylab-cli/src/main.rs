//! ReplayLab CLI — interactive practice sessions and feed inspection.
//!
//! Commands:
//! - `run` — play a practice session: each prompt accepts buy/sell/hold/end,
//!   plus pair and timeframe switches; prints the final report when the run
//!   turns terminal
//! - `fetch` — fetch a series and print the enriched tail (sanity checks on
//!   the data feed without starting a session)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use replaylab_core::config::PracticeConfig;
use replaylab_core::data::{GateIoProvider, MarketDataProvider, SyntheticProvider};
use replaylab_core::domain::{Timeframe, TradeSide};
use replaylab_core::indicators::enrich;
use replaylab_core::rng::StartPolicy;
use replaylab_core::session::{FinalReport, PracticeSession, Step};
use replaylab_core::signals::ThreeElements;

#[derive(Parser)]
#[command(
    name = "replaylab",
    about = "ReplayLab CLI — candle replay trading practice"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive practice session.
    Run {
        /// Trading pair (e.g., BTC/USDT). Defaults to the config value.
        #[arg(long)]
        pair: Option<String>,

        /// Timeframe: 1d, 4h, or 1h.
        #[arg(long)]
        timeframe: Option<String>,

        /// Number of candles to fetch.
        #[arg(long)]
        limit: Option<usize>,

        /// Master seed for the start cursor (reproducible runs).
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Offline mode: synthetic data, no network access.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Annotate limit-up pullback setups on each step.
        #[arg(long, default_value_t = false)]
        signals: bool,

        /// Print the final report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch a series and print the enriched tail.
    Fetch {
        /// Trading pair (e.g., BTC/USDT).
        pair: String,

        /// Timeframe: 1d, 4h, or 1h.
        #[arg(long, default_value = "1d")]
        timeframe: String,

        /// Number of candles to fetch.
        #[arg(long, default_value_t = 200)]
        limit: usize,

        /// Rows to print from the end of the series.
        #[arg(long, default_value_t = 10)]
        tail: usize,

        /// Offline mode: synthetic data, no network access.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            pair,
            timeframe,
            limit,
            seed,
            config,
            offline,
            signals,
            json,
        } => run_session(pair, timeframe, limit, seed, config, offline, signals, json),
        Commands::Fetch {
            pair,
            timeframe,
            limit,
            tail,
            offline,
        } => run_fetch(&pair, &timeframe, limit, tail, offline),
    }
}

fn build_provider(offline: bool, seed: u64) -> Box<dyn MarketDataProvider> {
    if offline {
        Box::new(SyntheticProvider::new(seed))
    } else {
        Box::new(GateIoProvider::new())
    }
}

#[allow(clippy::too_many_arguments)]
fn run_session(
    pair: Option<String>,
    timeframe: Option<String>,
    limit: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    offline: bool,
    signals: bool,
    json: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => PracticeConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PracticeConfig::default(),
    };

    let pair = pair.unwrap_or(config.session.pair);
    let timeframe = match timeframe {
        Some(s) => s.parse::<Timeframe>()?,
        None => config.session.timeframe,
    };
    let limit = limit.unwrap_or(config.session.limit);
    // Wall-clock randomness stays out here in the driver; the engine only
    // ever sees an explicit seed.
    let master_seed = seed.or(config.session.seed).unwrap_or_else(rand::random);
    let signals = signals || config.session.detect_setups;

    let provider = build_provider(offline, master_seed);
    let policy = StartPolicy::Seeded { master_seed };

    let mut session =
        PracticeSession::from_provider(provider.as_ref(), &pair, timeframe, limit, &policy)
            .with_context(|| format!("starting session for {pair} {timeframe}"))?;

    let detector = signals.then(ThreeElements::default);

    println!("Practice session: {pair} {timeframe} ({} bars, seed {master_seed})", limit);
    println!("Actions: b=buy  s=sell  h=hold  e=end  p <pair>  t <tf>  m=log  q=quit");
    print_snapshot(&session, detector.as_ref());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut report: Option<FinalReport> = None;

    loop {
        prompt()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        let (command, arg) = match input.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (input, ""),
        };

        let step = match command {
            "" => continue,
            "b" | "buy" => session.buy(),
            "s" | "sell" => session.sell(),
            "h" | "hold" => session.hold(),
            "e" | "end" => match session.end() {
                Ok(r) => {
                    report = Some(r);
                    break;
                }
                Err(e) => {
                    eprintln!("rejected: {e}");
                    continue;
                }
            },
            "p" | "pair" => {
                if arg.is_empty() {
                    eprintln!("usage: p <pair>  (e.g., p ETH/USDT)");
                    continue;
                }
                let tf = session.timeframe();
                switch(&mut session, provider.as_ref(), arg, tf, limit, &policy);
                print_snapshot(&session, detector.as_ref());
                continue;
            }
            "t" | "timeframe" => {
                let tf = match arg.parse::<Timeframe>() {
                    Ok(tf) => tf,
                    Err(e) => {
                        eprintln!("rejected: {e}");
                        continue;
                    }
                };
                let current_pair = session.pair().to_string();
                switch(&mut session, provider.as_ref(), &current_pair, tf, limit, &policy);
                print_snapshot(&session, detector.as_ref());
                continue;
            }
            "m" | "log" => {
                print_trade_log(&session);
                continue;
            }
            "q" | "quit" => break,
            "?" | "help" => {
                println!("Actions: b=buy  s=sell  h=hold  e=end  p <pair>  t <tf>  m=log  q=quit");
                continue;
            }
            other => {
                eprintln!("unknown command '{other}' (? for help)");
                continue;
            }
        };

        match step {
            Ok(Step::Advanced) => print_snapshot(&session, detector.as_ref()),
            Ok(Step::Ended(r)) => {
                report = Some(r);
                break;
            }
            Err(e) => eprintln!("rejected: {e}"),
        }
    }

    if let Some(report) = report {
        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(session.pair(), &report);
        }
    }

    Ok(())
}

fn switch(
    session: &mut PracticeSession,
    provider: &dyn MarketDataProvider,
    pair: &str,
    timeframe: Timeframe,
    limit: usize,
    policy: &StartPolicy,
) {
    match session.reset(provider, pair, timeframe, limit, policy) {
        Ok(()) => println!("Switched to {pair} {timeframe}; session restarted."),
        // Prior state is intact after a failed reset.
        Err(e) => eprintln!("switch failed, keeping current session: {e}"),
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn base_asset(pair: &str) -> &str {
    pair.split('/').next().unwrap_or(pair)
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "warming up".to_string(),
    }
}

fn print_snapshot(session: &PracticeSession, detector: Option<&ThreeElements>) {
    let snap = session.snapshot();
    println!(
        "{} | close {:.4} | RSI-13 {} | RSI-42 {}",
        snap.timestamp.format("%Y-%m-%d %H:%M"),
        snap.close,
        fmt_opt(snap.rsi_fast),
        fmt_opt(snap.rsi_slow),
    );
    println!(
        "balance {:.2} USDT | holdings {:.6} {}",
        snap.cash,
        snap.holdings,
        base_asset(session.pair()),
    );

    if let Some(detector) = detector {
        let (start, _) = session.visible_range();
        let flagged: Vec<usize> = detector
            .scan(session.revealed_bars())
            .map(|m| m.index)
            .filter(|&i| i >= start)
            .collect();
        if !flagged.is_empty() {
            println!("setup flagged at bar(s): {flagged:?}");
        }
    }
}

fn print_trade_log(session: &PracticeSession) {
    if session.trades().is_empty() {
        println!("(no trades yet)");
        return;
    }
    let asset = base_asset(session.pair()).to_string();
    for trade in session.trades() {
        match trade.side {
            TradeSide::Buy => println!(
                "Bought {:.2} {asset} at {}",
                trade.quantity, trade.price
            ),
            TradeSide::Sell => println!(
                "Sold {:.2} {asset} at {}. P/L: {:.2}%",
                trade.quantity,
                trade.price,
                trade.profit_pct.unwrap_or(0.0)
            ),
        }
    }
}

fn print_report(pair: &str, report: &FinalReport) {
    let asset = base_asset(pair);
    println!();
    println!("=== Session Result ===");
    println!("Final portfolio value: {:.2} USDT", report.final_value);
    println!("Total return:          {:.2}%", report.total_return_pct);
    println!("Last {asset} price:    {:.4} USDT", report.last_price);
    println!("Holdings:              {:.6} {asset}", report.holdings);
    println!("Balance:               {:.2} USDT", report.cash);
    println!();
    println!("Trade log:");
    if report.trades.is_empty() {
        println!("  (no trades)");
    }
    for trade in &report.trades {
        match trade.side {
            TradeSide::Buy => println!(
                "  Bought {:.2} {asset} at {}",
                trade.quantity, trade.price
            ),
            TradeSide::Sell => println!(
                "  Sold {:.2} {asset} at {}. P/L: {:.2}%",
                trade.quantity,
                trade.price,
                trade.profit_pct.unwrap_or(0.0)
            ),
        }
    }
}

fn run_fetch(pair: &str, timeframe: &str, limit: usize, tail: usize, offline: bool) -> Result<()> {
    let timeframe = timeframe.parse::<Timeframe>()?;
    if limit == 0 {
        bail!("--limit must be at least 1");
    }

    let provider = build_provider(offline, 0);
    let bars = provider
        .fetch(pair, timeframe, limit)
        .with_context(|| format!("fetching {pair} {timeframe} from {}", provider.name()))?;
    let series = enrich(bars).context("enriching fetched series")?;

    println!("{pair} {timeframe}: {} bars from {}", series.len(), provider.name());
    println!(
        "{:<17} {:>12} {:>10} {:>10} {:>12} {:>12}",
        "time", "close", "rsi-13", "rsi-42", "bb-upper", "bb-lower"
    );

    let start = series.len().saturating_sub(tail);
    for i in start..series.len() {
        let row = series.row(i).expect("index in range");
        let (upper, lower) = match row.bands {
            Some(b) => (format!("{:.4}", b.upper), format!("{:.4}", b.lower)),
            None => ("-".to_string(), "-".to_string()),
        };
        println!(
            "{:<17} {:>12.4} {:>10} {:>10} {:>12} {:>12}",
            row.bar.timestamp.format("%Y-%m-%d %H:%M"),
            row.bar.close,
            fmt_opt(row.rsi_fast),
            fmt_opt(row.rsi_slow),
            upper,
            lower,
        );
    }

    Ok(())
}
