//! # Price Aggregator
//!
//! A concurrent best-price aggregation engine.
//!
//! Given a product identifier, the engine queries every registered price
//! provider concurrently, optionally converts each quote into a target
//! currency using a separately fetched exchange rate, and returns one entry
//! per provider in registry order within bounded time, even when some
//! providers are slow.
//!
//! Key properties:
//!
//! - **Fan-out, full fan-in**: one pipeline per provider is launched up
//!   front; the call returns only once every pipeline reached a terminal
//!   state (value, timeout, or failure).
//! - **Registry-ordered results**: the result list order never depends on
//!   completion timing.
//! - **Graceful degradation**: a slow rate fetch degrades to a fallback
//!   factor; a slow pipeline marks only its own entry as timed out.
//! - **Interchangeable execution modes**: sequential, buffered
//!   (order-preserving parallel map), concurrent (task per provider), and
//!   the full conversion pipeline share the same primitives, which makes
//!   their latency characteristics directly comparable.
//!
//! # Examples
//!
//! ```
//! use price_aggregator::application::services::{ExecutionMode, PriceAggregator};
//! use price_aggregator::infrastructure::providers::{LatencyProfile, ProviderRegistry};
//! use price_aggregator::infrastructure::rates::SimulatedRateSource;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = ProviderRegistry::simulated(LatencyProfile::Zero);
//! let aggregator =
//!     PriceAggregator::with_defaults(registry, Arc::new(SimulatedRateSource::default()));
//!
//! let lines = aggregator
//!     .find_prices("myPhone27S", ExecutionMode::Converted)
//!     .await
//!     .unwrap();
//! assert_eq!(lines.len(), 4);
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::error::{AggregationError, AggregationResult};
pub use application::services::{
    AggregationConfig, ExecutionMode, PriceAggregator, ProviderResult, QuoteOutcome,
};
pub use domain::entities::{ConvertedQuote, Quote};
pub use domain::value_objects::{ConversionRate, Currency, ProviderId};
pub use infrastructure::providers::{
    LatencyProfile, PriceProvider, ProviderRegistry, SimulatedProvider,
};
pub use infrastructure::rates::{RateSource, SimulatedRateSource};
