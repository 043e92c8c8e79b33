//! Gate.io spot candlestick data provider.
//!
//! Fetches OHLCV candles from the Gate.io v4 spot REST API. Handles rate
//! limiting, retries with exponential backoff, and response parsing.
//!
//! The candlesticks endpoint returns an array of rows, each row an array of
//! strings: `[timestamp, quote_volume, close, high, low, open, base_volume,
//! window_closed]`. Older deployments omit the trailing columns, so rows of
//! 6, 7, or 8 fields are all accepted.

use super::provider::{DataError, MarketDataProvider};
use crate::domain::{Bar, Timeframe};
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.gateio.ws/api/v4";

/// Gate.io error body, e.g. `{"label":"INVALID_CURRENCY_PAIR","message":"..."}`.
#[derive(Debug, Deserialize)]
struct ApiError {
    label: String,
    message: String,
}

/// Gate.io spot data provider.
pub struct GateIoProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl GateIoProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("replaylab/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Point the provider at a different host (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Map a display pair like `BTC/USDT` to the exchange form `BTC_USDT`.
    ///
    /// Pairs given without a separator are passed through uppercased.
    pub fn currency_pair(pair: &str) -> String {
        pair.trim().replace('/', "_").to_uppercase()
    }

    fn candles_url(&self, pair: &str, timeframe: Timeframe, limit: usize) -> String {
        format!(
            "{}/spot/candlesticks?currency_pair={}&interval={}&limit={limit}",
            self.base_url,
            Self::currency_pair(pair),
            timeframe.as_str(),
        )
    }

    /// Parse one response row into a Bar.
    fn parse_row(pair: &str, index: usize, row: &[String]) -> Result<Bar, DataError> {
        if row.len() < 6 {
            return Err(DataError::ResponseFormatChanged(format!(
                "candle row {index} for {pair} has {} fields, expected at least 6",
                row.len()
            )));
        }

        let field = |pos: usize, name: &str| -> Result<f64, DataError> {
            row[pos].parse::<f64>().map_err(|_| {
                DataError::ResponseFormatChanged(format!(
                    "candle row {index} for {pair}: bad {name} '{}'",
                    row[pos]
                ))
            })
        };

        let ts_secs = row[0].parse::<i64>().map_err(|_| {
            DataError::ResponseFormatChanged(format!(
                "candle row {index} for {pair}: bad timestamp '{}'",
                row[0]
            ))
        })?;
        let timestamp = DateTime::from_timestamp(ts_secs, 0).ok_or_else(|| {
            DataError::ResponseFormatChanged(format!(
                "candle row {index} for {pair}: timestamp {ts_secs} out of range"
            ))
        })?;

        // Column 6 is base-asset volume where the API provides it; fall back
        // to the quote volume in column 1 otherwise.
        let volume = if row.len() > 6 {
            field(6, "base volume")?
        } else {
            field(1, "quote volume")?
        };

        Ok(Bar {
            timestamp,
            close: field(2, "close")?,
            high: field(3, "high")?,
            low: field(4, "low")?,
            open: field(5, "open")?,
            volume,
        })
    }

    fn parse_response(pair: &str, rows: Vec<Vec<String>>) -> Result<Vec<Bar>, DataError> {
        if rows.is_empty() {
            return Err(DataError::EmptyResponse {
                pair: pair.to_string(),
            });
        }

        let mut bars = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Self::parse_row(pair, i, row))
            .collect::<Result<Vec<_>, _>>()?;

        // The API documents ascending order; sort defensively so a reordered
        // response cannot trip series validation downstream.
        bars.sort_by_key(|bar| bar.timestamp);
        Ok(bars)
    }

    fn fetch_with_retry(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Bar>, DataError> {
        let url = self.candles_url(pair, timeframe, limit);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        // Gate.io reports failures as {"label", "message"}.
                        let body = resp.text().unwrap_or_default();
                        if let Ok(err) = serde_json::from_str::<ApiError>(&body) {
                            if err.label == "INVALID_CURRENCY_PAIR"
                                || err.label == "CURRENCY_PAIR_NOT_FOUND"
                            {
                                return Err(DataError::PairNotFound {
                                    pair: pair.to_string(),
                                });
                            }
                            return Err(DataError::Other(format!(
                                "{}: {}",
                                err.label, err.message
                            )));
                        }
                        last_error = Some(DataError::Other(format!("HTTP {status} for {pair}")));
                        continue;
                    }

                    let rows: Vec<Vec<String>> = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse candle response for {pair}: {e}"
                        ))
                    })?;

                    return Self::parse_response(pair, rows);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl Default for GateIoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for GateIoProvider {
    fn name(&self) -> &str {
        "gateio"
    }

    fn fetch(&self, pair: &str, timeframe: Timeframe, limit: usize) -> Result<Vec<Bar>, DataError> {
        self.fetch_with_retry(pair, timeframe, limit)
    }
}
