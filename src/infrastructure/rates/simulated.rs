//! # Simulated Rate Source
//!
//! In-process exchange service with configurable latency.
//!
//! Cross rates are derived from each currency's nominal per-euro units, so
//! any pair has a deterministic factor and `rate(x, x)` is always `1.0`.

use crate::domain::value_objects::Currency;
use crate::infrastructure::providers::LatencyProfile;
use crate::infrastructure::rates::traits::RateSource;
use async_trait::async_trait;

/// An exchange-rate source with simulated latency.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRateSource {
    latency: LatencyProfile,
}

impl SimulatedRateSource {
    /// Creates a rate source with the given latency profile.
    #[must_use]
    pub const fn new(latency: LatencyProfile) -> Self {
        Self { latency }
    }

    /// Returns the latency profile.
    #[inline]
    #[must_use]
    pub const fn latency(&self) -> LatencyProfile {
        self.latency
    }
}

#[async_trait]
impl RateSource for SimulatedRateSource {
    async fn rate(&self, from: Currency, to: Currency) -> f64 {
        let delay = self.latency.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        to.units_per_eur() / from.units_per_eur()
    }
}
