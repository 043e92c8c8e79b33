//! Domain types: bars, timeframes, trades, series validation.

pub mod bar;
pub mod series;
pub mod timeframe;
pub mod trade;

pub use bar::Bar;
pub use series::{validate_bars, SeriesError};
pub use timeframe::{ParseTimeframeError, Timeframe};
pub use trade::{TradeMark, TradeRecord, TradeSide};
