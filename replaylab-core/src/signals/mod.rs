//! Setup detection over revealed bars.

pub mod three_elements;

pub use three_elements::{SetupMatch, Setups, ThreeElements, DEFAULT_LIMIT_UP_RATIO};
