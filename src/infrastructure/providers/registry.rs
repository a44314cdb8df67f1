//! # Provider Registry
//!
//! Ordered, immutable set of price providers.
//!
//! The registry is fixed at construction and passed explicitly into the
//! aggregator; there is no ambient global provider list. Registry order is
//! the order of the final result list, independent of completion timing.

use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::simulated::{LatencyProfile, SimulatedProvider};
use crate::infrastructure::providers::traits::PriceProvider;
use std::sync::Arc;

/// Default provider names used by [`ProviderRegistry::simulated`].
pub const DEFAULT_PROVIDER_NAMES: [&str; 4] =
    ["BestPrice", "LetsSaveBig", "MyFavoriteShop", "BuyItAll"];

/// An ordered, immutable list of providers fixed at construction.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn PriceProvider>>,
}

impl ProviderRegistry {
    /// Creates a registry from an ordered list of providers.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn PriceProvider>>) -> Self {
        Self { providers }
    }

    /// Creates a registry of the default simulated providers, all sharing
    /// the given latency profile.
    #[must_use]
    pub fn simulated(latency: LatencyProfile) -> Self {
        let providers = DEFAULT_PROVIDER_NAMES
            .iter()
            .map(|name| Arc::new(SimulatedProvider::new(*name, latency)) as Arc<dyn PriceProvider>)
            .collect();
        Self::new(providers)
    }

    /// Returns the providers in registry order.
    #[inline]
    #[must_use]
    pub fn providers(&self) -> &[Arc<dyn PriceProvider>] {
        &self.providers
    }

    /// Returns the provider with the given id, if registered.
    #[must_use]
    pub fn get(&self, id: &ProviderId) -> Option<&Arc<dyn PriceProvider>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// Returns the number of registered providers.
    ///
    /// This also bounds the useful parallelism of one aggregation call.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if the registry has no providers.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Iterates over the providers in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn PriceProvider>> {
        self.providers.iter()
    }
}
