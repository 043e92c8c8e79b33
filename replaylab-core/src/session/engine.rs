//! PracticeSession — step-by-step paper trading over a historical series.
//!
//! The session owns an enriched series and a cursor into it. Each action
//! (buy, sell, hold) settles at the current bar's close and then reveals the
//! next bar by advancing the cursor; reaching the final bar, or an explicit
//! `end`, makes the session terminal and produces a [`FinalReport`].
//!
//! Ledger policy is all-in/all-out: a buy converts the entire cash balance
//! into holdings, a sell liquidates the entire position. At most one of
//! cash/holdings is ever non-zero.

use super::report::FinalReport;
use super::SessionError;
use crate::data::MarketDataProvider;
use crate::domain::{Bar, Timeframe, TradeMark, TradeRecord, TradeSide};
use crate::indicators::{enrich, EnrichedSeries, IndicatorRow};
use crate::rng::{StartPolicy, MIN_START_INDEX};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fixed starting capital. Sell profit percentages and the final return are
/// both measured against this figure, not against per-trade cost basis.
pub const STARTING_CAPITAL: f64 = 1000.0;

/// Bars shown at once by the presentation layer.
pub const DISPLAY_WINDOW: usize = 100;

/// What an action did to the session clock.
#[derive(Debug, Clone)]
pub enum Step {
    /// The cursor advanced; the caller should re-read the current row.
    Advanced,
    /// The cursor reached the last bar; the session is now terminal.
    Ended(FinalReport),
}

/// Read-only snapshot of the current bar and ledger for display.
#[derive(Debug, Clone, Serialize)]
pub struct InfoSnapshot {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub rsi_fast: Option<f64>,
    pub rsi_slow: Option<f64>,
    pub cash: f64,
    pub holdings: f64,
}

/// Stateful paper-trading engine over one (pair, timeframe) series.
#[derive(Debug)]
pub struct PracticeSession {
    pair: String,
    timeframe: Timeframe,
    series: EnrichedSeries,
    cursor: usize,
    cash: f64,
    holdings: f64,
    trades: Vec<TradeRecord>,
    marks: Vec<TradeMark>,
    ended: bool,
}

impl PracticeSession {
    /// Start a session over an already-enriched series.
    pub fn new(
        pair: impl Into<String>,
        timeframe: Timeframe,
        series: EnrichedSeries,
        start: &StartPolicy,
    ) -> Result<Self, SessionError> {
        let pair = pair.into();
        let len = series.len();
        if matches!(start, StartPolicy::Seeded { .. }) && len < MIN_START_INDEX + 2 {
            return Err(SessionError::InsufficientHistory {
                need: MIN_START_INDEX + 2,
                got: len,
            });
        }

        let cursor = start.start_index(&pair, timeframe, len);
        if cursor + 1 >= len {
            // A session must be able to reveal at least one more bar.
            return Err(SessionError::InsufficientHistory {
                need: cursor + 2,
                got: len,
            });
        }

        Ok(Self {
            pair,
            timeframe,
            series,
            cursor,
            cash: STARTING_CAPITAL,
            holdings: 0.0,
            trades: Vec::new(),
            marks: Vec::new(),
            ended: false,
        })
    }

    /// Fetch, enrich, and start a session in one step.
    pub fn from_provider(
        provider: &dyn MarketDataProvider,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
        start: &StartPolicy,
    ) -> Result<Self, SessionError> {
        let bars = provider.fetch(pair, timeframe, limit)?;
        let series = enrich(bars)?;
        Self::new(pair, timeframe, series, start)
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Convert the full cash balance into holdings at the current close,
    /// then reveal the next bar.
    pub fn buy(&mut self) -> Result<Step, SessionError> {
        self.ensure_active()?;
        if self.cash <= 0.0 {
            return Err(SessionError::InsufficientFunds);
        }

        let price = self.current_close();
        let quantity = self.cash / price;
        self.holdings += quantity;
        self.cash = 0.0;
        self.trades.push(TradeRecord {
            side: TradeSide::Buy,
            bar_index: self.cursor,
            price,
            quantity,
            profit_pct: None,
        });
        self.marks.push(TradeMark {
            bar_index: self.cursor,
            side: TradeSide::Buy,
        });

        Ok(self.advance())
    }

    /// Liquidate the full position at the current close, then reveal the
    /// next bar. The logged profit percentage is relative to
    /// [`STARTING_CAPITAL`].
    pub fn sell(&mut self) -> Result<Step, SessionError> {
        self.ensure_active()?;
        if self.holdings <= 0.0 {
            return Err(SessionError::InsufficientHoldings);
        }

        let price = self.current_close();
        let quantity = self.holdings;
        let proceeds = quantity * price;
        let profit_pct = (proceeds - STARTING_CAPITAL) / STARTING_CAPITAL * 100.0;
        self.cash = proceeds;
        self.holdings = 0.0;
        self.trades.push(TradeRecord {
            side: TradeSide::Sell,
            bar_index: self.cursor,
            price,
            quantity,
            profit_pct: Some(profit_pct),
        });
        self.marks.push(TradeMark {
            bar_index: self.cursor,
            side: TradeSide::Sell,
        });

        Ok(self.advance())
    }

    /// Do nothing with the ledger; just reveal the next bar.
    pub fn hold(&mut self) -> Result<Step, SessionError> {
        self.ensure_active()?;
        Ok(self.advance())
    }

    /// Force the session terminal without touching cursor or ledger.
    pub fn end(&mut self) -> Result<FinalReport, SessionError> {
        self.ensure_active()?;
        self.ended = true;
        Ok(self.final_report())
    }

    /// Replace the underlying series (pair or timeframe change) and restart
    /// the run: fresh cursor, full starting capital, empty log and marks.
    ///
    /// Any feed or series failure leaves the current session untouched.
    pub fn reset(
        &mut self,
        provider: &dyn MarketDataProvider,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
        start: &StartPolicy,
    ) -> Result<(), SessionError> {
        let fresh = Self::from_provider(provider, pair, timeframe, limit, start)?;
        *self = fresh;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.ended {
            Err(SessionError::Ended)
        } else {
            Ok(())
        }
    }

    fn advance(&mut self) -> Step {
        self.cursor += 1;
        if self.cursor >= self.series.len() - 1 {
            self.cursor = self.series.len() - 1;
            self.ended = true;
            Step::Ended(self.final_report())
        } else {
            Step::Advanced
        }
    }

    fn final_report(&self) -> FinalReport {
        let last_price = self.current_close();
        let final_value = self.cash + self.holdings * last_price;
        FinalReport {
            final_value,
            total_return_pct: (final_value - STARTING_CAPITAL) / STARTING_CAPITAL * 100.0,
            last_price,
            holdings: self.holdings,
            cash: self.cash,
            trades: self.trades.clone(),
        }
    }

    // ── Read-only surface for the presentation layer ─────────────────

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash
    }

    pub fn holdings(&self) -> f64 {
        self.holdings
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn marks(&self) -> &[TradeMark] {
        &self.marks
    }

    pub fn series(&self) -> &EnrichedSeries {
        &self.series
    }

    /// The row under the cursor. Always in range by construction.
    pub fn current_row(&self) -> IndicatorRow<'_> {
        self.series
            .row(self.cursor)
            .expect("cursor is always a valid series index")
    }

    fn current_close(&self) -> f64 {
        self.current_row().bar.close
    }

    /// Everything revealed so far: bars `0..=cursor`. This is the slice to
    /// hand to the setup detector — it cannot contain future data.
    pub fn revealed_bars(&self) -> &[Bar] {
        &self.series.bars()[..=self.cursor]
    }

    /// Half-open index range of the trailing display window.
    pub fn visible_range(&self) -> (usize, usize) {
        let end = self.cursor + 1;
        (end.saturating_sub(DISPLAY_WINDOW), end)
    }

    /// Current bar, indicators, and ledger in one display-ready struct.
    pub fn snapshot(&self) -> InfoSnapshot {
        let row = self.current_row();
        InfoSnapshot {
            timestamp: row.bar.timestamp,
            close: row.bar.close,
            rsi_fast: row.rsi_fast,
            rsi_slow: row.rsi_slow,
            cash: self.cash,
            holdings: self.holdings,
        }
    }
}
