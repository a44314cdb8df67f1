//! # Simulated Provider
//!
//! Deterministic in-process provider with configurable latency.
//!
//! [`SimulatedProvider`] stands in for a real price feed: the returned
//! price is a pure function of `(provider id, product)` while the response
//! latency follows a configurable [`LatencyProfile`]. Tests and benchmarks
//! use it to exercise the aggregator under controlled timing.

use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::traits::PriceProvider;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;

/// Latency behavior of a simulated capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatencyProfile {
    /// Respond immediately.
    Zero,
    /// Respond after a fixed delay.
    Fixed(Duration),
    /// Respond after a uniformly random delay in `[min, max]`.
    Jitter {
        /// Lower bound of the delay.
        min: Duration,
        /// Upper bound of the delay.
        max: Duration,
    },
}

impl LatencyProfile {
    /// Draws one delay from this profile.
    #[must_use]
    pub fn sample(&self) -> Duration {
        match *self {
            Self::Zero => Duration::ZERO,
            Self::Fixed(delay) => delay,
            Self::Jitter { min, max } => {
                if max <= min {
                    return min;
                }
                let lo = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
                let hi = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
                Duration::from_millis(rand::rng().random_range(lo..=hi))
            }
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::Zero
    }
}

/// A price provider with simulated latency and deterministic prices.
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    id: ProviderId,
    latency: LatencyProfile,
}

impl SimulatedProvider {
    /// Creates a simulated provider with the given latency profile.
    #[must_use]
    pub fn new(id: impl Into<ProviderId>, latency: LatencyProfile) -> Self {
        Self {
            id: id.into(),
            latency,
        }
    }

    /// Returns the latency profile.
    #[inline]
    #[must_use]
    pub const fn latency(&self) -> LatencyProfile {
        self.latency
    }

    /// Computes the deterministic price for a product.
    ///
    /// The price is derived from a seeded generator so that the same
    /// `(provider id, product)` pair always yields the same value.
    fn price_for(&self, product: &str) -> f64 {
        let mut hasher = DefaultHasher::new();
        self.id.as_str().hash(&mut hasher);
        product.hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(hasher.finish());

        let mut chars = product.chars();
        let lead = chars.next().map_or(64.0, |c| f64::from(c as u32 % 128));
        let next = chars.next().map_or(32.0, |c| f64::from(c as u32 % 128));
        rng.random_range(0.5..2.5) * lead + next
    }
}

impl From<&str> for SimulatedProvider {
    fn from(name: &str) -> Self {
        Self::new(name, LatencyProfile::Zero)
    }
}

#[async_trait]
impl PriceProvider for SimulatedProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn quote(&self, product: &str) -> f64 {
        let delay = self.latency.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.price_for(product)
    }
}
