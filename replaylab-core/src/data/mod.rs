//! Data feed: provider trait, Gate.io REST client, synthetic generator.

pub mod gateio;
pub mod provider;
pub mod synthetic;

pub use gateio::GateIoProvider;
pub use provider::{DataError, MarketDataProvider};
pub use synthetic::SyntheticProvider;
