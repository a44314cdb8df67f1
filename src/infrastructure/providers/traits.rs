//! # Price Provider Trait
//!
//! Port definition for price-providing capabilities.
//!
//! This module defines the [`PriceProvider`] trait that all price sources
//! implement. A provider is an in-process capability with arbitrary,
//! possibly simulated, latency; it always eventually returns a price and
//! models no error path of its own. Deadlines are the aggregator's concern.

use crate::domain::value_objects::ProviderId;
use async_trait::async_trait;
use std::fmt;

/// A named source of price quotes for products.
///
/// Implementations must be deterministic with respect to
/// `(provider id, product)` so that repeated queries are testable; latency
/// may vary freely.
#[async_trait]
pub trait PriceProvider: Send + Sync + fmt::Debug {
    /// Returns this provider's identifier.
    fn id(&self) -> &ProviderId;

    /// Returns the price for the given product.
    ///
    /// Never fails; the call may take arbitrarily long.
    async fn quote(&self, product: &str) -> f64;
}
