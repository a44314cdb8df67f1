//! # Exchange Rates
//!
//! Rate-source port and the simulated exchange service.

pub mod simulated;
pub mod traits;

pub use simulated::SimulatedRateSource;
pub use traits::RateSource;
