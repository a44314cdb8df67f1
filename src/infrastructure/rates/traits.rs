//! # Exchange Rate Trait
//!
//! Port definition for the exchange-rate capability.

use crate::domain::value_objects::Currency;
use async_trait::async_trait;
use std::fmt;

/// A source of currency conversion factors.
///
/// Like the provider capability, a rate source always eventually succeeds
/// and may take arbitrarily long; the caller applies its own timeout and
/// fallback around it.
#[async_trait]
pub trait RateSource: Send + Sync + fmt::Debug {
    /// Returns the multiplicative factor converting `from` into `to`.
    async fn rate(&self, from: Currency, to: Currency) -> f64;
}
