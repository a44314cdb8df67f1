//! # Price Providers
//!
//! Provider port, simulated adapter, and the registry the aggregator
//! fans out over.

pub mod registry;
pub mod simulated;
pub mod traits;

pub use registry::{ProviderRegistry, DEFAULT_PROVIDER_NAMES};
pub use simulated::{LatencyProfile, SimulatedProvider};
pub use traits::PriceProvider;
