//! ReplayLab Core — candle replay practice engine.
//!
//! This crate contains everything behind the presentation layer:
//! - Domain types (bars, timeframes, trades, series validation)
//! - Data feed providers (Gate.io REST, deterministic synthetic)
//! - Indicator engine (Bollinger Bands, dual-length simple RSI)
//! - Limit-up pullback setup detector
//! - Practice session state machine with all-in/all-out accounting
//! - Seeded start-cursor selection and TOML configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod rng;
pub mod session;
pub mod signals;
