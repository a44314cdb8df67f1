//! # Price Aggregation Engine
//!
//! Orchestrates concurrent quote collection and currency conversion.
//!
//! This module provides the [`PriceAggregator`], which fans out one quote
//! pipeline per registered provider, optionally joins each quote with a
//! concurrently fetched conversion rate, and fans the results back in
//! preserving registry order. Each pipeline is bounded by a deadline so the
//! overall call never waits on the slowest possible provider.
//!
//! Per-provider outcomes are tagged ([`QuoteOutcome`]) rather than raced:
//! a timed-out or panicked pipeline yields a marked entry while the other
//! providers' entries are unaffected, and the result list always has exactly
//! one entry per provider.

use crate::application::error::{AggregationError, AggregationResult};
use crate::domain::entities::quote::{ConvertedQuote, Quote};
use crate::domain::value_objects::{ConversionRate, Currency, ProviderId};
use crate::infrastructure::providers::ProviderRegistry;
use crate::infrastructure::rates::RateSource;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Fallback conversion factor used when the rate fetch times out.
pub const DEFAULT_RATE: f64 = 1.35;

/// Default deadline for the inner rate fetch.
pub const RATE_TIMEOUT: Duration = Duration::from_secs(1);

/// Default deadline for a whole per-provider pipeline.
pub const PIPELINE_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration for price aggregation.
///
/// Passed explicitly into the [`PriceAggregator`] constructor; there is no
/// ambient global configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Fallback conversion factor when the rate fetch times out.
    pub default_rate: f64,
    /// Deadline for the inner rate fetch.
    pub rate_timeout: Duration,
    /// Deadline for a whole per-provider pipeline.
    pub pipeline_timeout: Duration,
    /// Currency providers quote in.
    pub source_currency: Currency,
    /// Currency converted results are denominated in.
    pub target_currency: Currency,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_RATE,
            rate_timeout: RATE_TIMEOUT,
            pipeline_timeout: PIPELINE_TIMEOUT,
            source_currency: Currency::Eur,
            target_currency: Currency::Usd,
        }
    }
}

impl AggregationConfig {
    /// Sets the fallback conversion factor.
    #[must_use]
    pub const fn with_default_rate(mut self, rate: f64) -> Self {
        self.default_rate = rate;
        self
    }

    /// Sets the inner rate-fetch deadline.
    #[must_use]
    pub const fn with_rate_timeout(mut self, deadline: Duration) -> Self {
        self.rate_timeout = deadline;
        self
    }

    /// Sets the per-provider pipeline deadline.
    #[must_use]
    pub const fn with_pipeline_timeout(mut self, deadline: Duration) -> Self {
        self.pipeline_timeout = deadline;
        self
    }

    /// Sets the conversion currency pair.
    #[must_use]
    pub const fn with_currencies(mut self, source: Currency, target: Currency) -> Self {
        self.source_currency = source;
        self.target_currency = target;
        self
    }
}

/// Terminal state of one per-provider pipeline.
///
/// A pipeline either produced a value, ran past its deadline, or failed
/// unexpectedly. Timeouts and failures are per-provider conditions; they
/// never abort the aggregation as a whole.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    /// The pipeline produced a quote.
    Priced(ConvertedQuote),
    /// The pipeline missed its deadline.
    TimedOut,
    /// The pipeline failed for a reason other than its deadline.
    Failed(String),
}

impl QuoteOutcome {
    /// Returns true if the pipeline produced a quote.
    #[inline]
    #[must_use]
    pub const fn is_priced(&self) -> bool {
        matches!(self, Self::Priced(_))
    }

    /// Returns true if the pipeline missed its deadline.
    #[inline]
    #[must_use]
    pub const fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    /// Returns the quote, if the pipeline produced one.
    #[must_use]
    pub const fn quote(&self) -> Option<&ConvertedQuote> {
        match self {
            Self::Priced(quote) => Some(quote),
            _ => None,
        }
    }
}

/// One provider's entry in the aggregated result list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    provider: ProviderId,
    outcome: QuoteOutcome,
}

impl ProviderResult {
    /// Creates a new provider result.
    #[must_use]
    pub const fn new(provider: ProviderId, outcome: QuoteOutcome) -> Self {
        Self { provider, outcome }
    }

    /// Returns the provider this entry belongs to.
    #[inline]
    #[must_use]
    pub const fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the pipeline outcome.
    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> &QuoteOutcome {
        &self.outcome
    }
}

impl fmt::Display for ProviderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            QuoteOutcome::Priced(quote) => {
                write!(f, "{} price is {:.2}", self.provider, quote.price())
            }
            QuoteOutcome::TimedOut => {
                write!(f, "{} price is unavailable (timed out)", self.provider)
            }
            QuoteOutcome::Failed(reason) => {
                write!(f, "{} price is unavailable ({reason})", self.provider)
            }
        }
    }
}

/// Engine for collecting prices from all registered providers.
///
/// The registry, the rate source, and the configuration are fixed at
/// construction. Tasks communicate results only through their own handles;
/// the engine holds no shared mutable state.
#[derive(Debug)]
pub struct PriceAggregator {
    registry: ProviderRegistry,
    rates: Arc<dyn RateSource>,
    config: AggregationConfig,
}

impl PriceAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub fn new(
        registry: ProviderRegistry,
        rates: Arc<dyn RateSource>,
        config: AggregationConfig,
    ) -> Self {
        Self {
            registry,
            rates,
            config,
        }
    }

    /// Creates a new aggregator with default configuration.
    #[must_use]
    pub fn with_defaults(registry: ProviderRegistry, rates: Arc<dyn RateSource>) -> Self {
        Self::new(registry, rates, AggregationConfig::default())
    }

    /// Returns the current configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the provider registry.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    fn ensure_providers(&self) -> AggregationResult<()> {
        if self.registry.is_empty() {
            return Err(AggregationError::NoProviders);
        }
        Ok(())
    }

    /// Queries providers one at a time, no concurrency.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::NoProviders`] if the registry is empty.
    pub async fn collect_sequential(&self, product: &str) -> AggregationResult<Vec<ProviderResult>> {
        self.ensure_providers()?;

        let mut results = Vec::with_capacity(self.registry.len());
        for provider in self.registry.iter() {
            let price = provider.quote(product).await;
            let quote =
                Quote::new(provider.id().clone(), price).in_currency(self.config.source_currency);
            results.push(ProviderResult::new(
                provider.id().clone(),
                QuoteOutcome::Priced(quote),
            ));
        }
        Ok(results)
    }

    /// Queries providers through an order-preserving parallel map.
    ///
    /// Concurrency is bounded by the provider count; no task objects are
    /// spawned.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::NoProviders`] if the registry is empty.
    pub async fn collect_buffered(&self, product: &str) -> AggregationResult<Vec<ProviderResult>> {
        self.ensure_providers()?;

        let width = self.registry.len();
        let results = stream::iter(self.registry.iter().cloned())
            .map(|provider| {
                let product = product.to_string();
                let currency = self.config.source_currency;
                async move {
                    let price = provider.quote(&product).await;
                    let quote = Quote::new(provider.id().clone(), price).in_currency(currency);
                    ProviderResult::new(provider.id().clone(), QuoteOutcome::Priced(quote))
                }
            })
            .buffered(width)
            .collect()
            .await;
        Ok(results)
    }

    /// Queries providers with one spawned task each, joined in registry
    /// order, without currency conversion.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::NoProviders`] if the registry is empty.
    pub async fn collect_concurrent(&self, product: &str) -> AggregationResult<Vec<ProviderResult>> {
        self.ensure_providers()?;

        let mut handles = Vec::with_capacity(self.registry.len());
        for provider in self.registry.iter() {
            let provider = Arc::clone(provider);
            let product = product.to_string();
            let currency = self.config.source_currency;
            let id = provider.id().clone();
            let handle = tokio::spawn(async move {
                let price = provider.quote(&product).await;
                Quote::new(provider.id().clone(), price).in_currency(currency)
            });
            handles.push((id, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            let outcome = match handle.await {
                Ok(quote) => QuoteOutcome::Priced(quote),
                Err(err) => {
                    tracing::warn!(provider = %id, error = %err, "quote task failed");
                    QuoteOutcome::Failed(err.to_string())
                }
            };
            results.push(ProviderResult::new(id, outcome));
        }
        Ok(results)
    }

    /// Runs the full conversion pipeline for every provider.
    ///
    /// Per provider: the quote and the conversion rate are fetched
    /// concurrently, joined by multiplication once both are ready, and the
    /// combined computation is bounded by the pipeline deadline. The rate
    /// fetch carries its own shorter deadline and degrades to the configured
    /// fallback factor instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::NoProviders`] if the registry is empty.
    pub async fn collect_converted(&self, product: &str) -> AggregationResult<Vec<ProviderResult>> {
        self.ensure_providers()?;

        let mut handles = Vec::with_capacity(self.registry.len());
        for provider in self.registry.iter() {
            let provider = Arc::clone(provider);
            let rates = Arc::clone(&self.rates);
            let config = self.config.clone();
            let product = product.to_string();
            let id = provider.id().clone();
            let handle = tokio::spawn(async move {
                let pipeline = async {
                    let quote_task = async {
                        let price = provider.quote(&product).await;
                        Quote::new(provider.id().clone(), price)
                    };
                    let rate_task = rate_or_default(rates, &config);
                    // Join point: conversion starts only once both inputs
                    // are ready; their completion order is unconstrained.
                    let (quote, rate) = tokio::join!(quote_task, rate_task);
                    quote.convert(&rate)
                };
                match timeout(config.pipeline_timeout, pipeline).await {
                    Ok(converted) => QuoteOutcome::Priced(converted),
                    Err(_) => QuoteOutcome::TimedOut,
                }
            });
            handles.push((id, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(provider = %id, error = %err, "pipeline task failed");
                    QuoteOutcome::Failed(err.to_string())
                }
            };
            results.push(ProviderResult::new(id, outcome));
        }
        Ok(results)
    }
}

/// Fetches the configured conversion rate, degrading to the fallback factor
/// if the fetch misses its deadline.
async fn rate_or_default(rates: Arc<dyn RateSource>, config: &AggregationConfig) -> ConversionRate {
    let (source, target) = (config.source_currency, config.target_currency);
    match timeout(config.rate_timeout, rates.rate(source, target)).await {
        Ok(factor) => ConversionRate::new(source, target, factor),
        Err(_) => {
            tracing::debug!(
                %source,
                %target,
                fallback = config.default_rate,
                "rate fetch timed out, using fallback"
            );
            ConversionRate::new(source, target, config.default_rate)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::infrastructure::providers::{LatencyProfile, PriceProvider, ProviderRegistry};
    use crate::infrastructure::rates::SimulatedRateSource;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedPriceProvider {
        id: ProviderId,
        price: f64,
        delay: Duration,
    }

    impl FixedPriceProvider {
        fn new(id: &str, price: f64) -> Self {
            Self {
                id: ProviderId::new(id),
                price,
                delay: Duration::ZERO,
            }
        }

        fn slow(id: &str, price: f64, delay: Duration) -> Self {
            Self {
                id: ProviderId::new(id),
                price,
                delay,
            }
        }
    }

    #[async_trait]
    impl PriceProvider for FixedPriceProvider {
        fn id(&self) -> &ProviderId {
            &self.id
        }

        async fn quote(&self, _product: &str) -> f64 {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.price
        }
    }

    #[derive(Debug)]
    struct PanickingProvider {
        id: ProviderId,
    }

    #[async_trait]
    impl PriceProvider for PanickingProvider {
        fn id(&self) -> &ProviderId {
            &self.id
        }

        async fn quote(&self, _product: &str) -> f64 {
            panic!("provider blew up");
        }
    }

    #[derive(Debug)]
    struct FixedRateSource {
        factor: f64,
        delay: Duration,
    }

    #[async_trait]
    impl RateSource for FixedRateSource {
        async fn rate(&self, _from: Currency, _to: Currency) -> f64 {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.factor
        }
    }

    fn registry_of(providers: Vec<FixedPriceProvider>) -> ProviderRegistry {
        ProviderRegistry::new(
            providers
                .into_iter()
                .map(|p| Arc::new(p) as Arc<dyn PriceProvider>)
                .collect(),
        )
    }

    fn instant_rates() -> Arc<dyn RateSource> {
        Arc::new(SimulatedRateSource::default())
    }

    #[tokio::test]
    async fn sequential_returns_one_entry_per_provider() {
        let registry = registry_of(vec![
            FixedPriceProvider::new("a", 1.0),
            FixedPriceProvider::new("b", 2.0),
            FixedPriceProvider::new("c", 3.0),
        ]);
        let aggregator = PriceAggregator::with_defaults(registry, instant_rates());

        let results = aggregator.collect_sequential("myPhone27S").await.unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.outcome().is_priced()));
    }

    #[tokio::test]
    async fn empty_registry_is_an_error() {
        let aggregator =
            PriceAggregator::with_defaults(ProviderRegistry::new(Vec::new()), instant_rates());

        let err = aggregator.collect_sequential("myPhone27S").await.unwrap_err();
        assert_eq!(err, AggregationError::NoProviders);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_completes_in_slowest_provider_time() {
        let one_sec = Duration::from_secs(1);
        let registry = registry_of(
            ["a", "b", "c", "d"]
                .iter()
                .map(|id| FixedPriceProvider::slow(id, 10.0, one_sec))
                .collect(),
        );
        let aggregator = PriceAggregator::with_defaults(registry, instant_rates());

        let started = tokio::time::Instant::now();
        let results = aggregator.collect_concurrent("myPhone27S").await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(results.len(), 4);
        assert!(elapsed >= one_sec);
        assert!(elapsed < Duration::from_millis(1500), "no parallel speedup: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn buffered_completes_in_slowest_provider_time() {
        let one_sec = Duration::from_secs(1);
        let registry = registry_of(
            ["a", "b", "c", "d"]
                .iter()
                .map(|id| FixedPriceProvider::slow(id, 10.0, one_sec))
                .collect(),
        );
        let aggregator = PriceAggregator::with_defaults(registry, instant_rates());

        let started = tokio::time::Instant::now();
        let results = aggregator.collect_buffered("myPhone27S").await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(results.len(), 4);
        assert!(elapsed < Duration::from_millis(1500), "no parallel speedup: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_sums_provider_latencies() {
        let one_sec = Duration::from_secs(1);
        let registry = registry_of(
            ["a", "b", "c", "d"]
                .iter()
                .map(|id| FixedPriceProvider::slow(id, 10.0, one_sec))
                .collect(),
        );
        let aggregator = PriceAggregator::with_defaults(registry, instant_rates());

        let started = tokio::time::Instant::now();
        aggregator.collect_sequential("myPhone27S").await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_rate_fetch_falls_back_to_default_rate() {
        let registry = registry_of(vec![FixedPriceProvider::new("a", 100.0)]);
        let rates = Arc::new(FixedRateSource {
            factor: 2.0,
            delay: Duration::from_secs(2),
        });
        let config = AggregationConfig::default()
            .with_rate_timeout(Duration::from_secs(1))
            .with_default_rate(1.35);
        let aggregator = PriceAggregator::new(registry, rates, config);

        let results = aggregator.collect_converted("myPhone27S").await.unwrap();
        let quote = results.first().unwrap().outcome().quote().unwrap();
        assert!((quote.price() - 135.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn fast_rate_fetch_is_used_exactly() {
        let registry = registry_of(vec![FixedPriceProvider::new("a", 100.0)]);
        let rates = Arc::new(FixedRateSource {
            factor: 2.0,
            delay: Duration::ZERO,
        });
        let aggregator =
            PriceAggregator::new(registry, rates, AggregationConfig::default());

        let results = aggregator.collect_converted("myPhone27S").await.unwrap();
        let quote = results.first().unwrap().outcome().quote().unwrap();
        assert!((quote.price() - 200.0).abs() < 1e-9);
        assert_eq!(quote.currency(), Currency::Usd);
    }

    #[tokio::test(start_paused = true)]
    async fn pipeline_timeout_marks_only_the_slow_provider() {
        let registry = registry_of(vec![
            FixedPriceProvider::slow("stuck", 10.0, Duration::from_secs(5)),
            FixedPriceProvider::new("fast", 20.0),
        ]);
        let aggregator = PriceAggregator::with_defaults(registry, instant_rates());

        let results = aggregator.collect_converted("myPhone27S").await.unwrap();
        assert_eq!(results.len(), 2);

        let mut iter = results.iter();
        let stuck = iter.next().unwrap();
        let fast = iter.next().unwrap();
        assert_eq!(stuck.provider().as_str(), "stuck");
        assert!(stuck.outcome().is_timed_out());
        assert!(fast.outcome().is_priced());
    }

    #[tokio::test(start_paused = true)]
    async fn converted_latency_is_bounded_by_pipeline_timeout() {
        let registry = registry_of(vec![FixedPriceProvider::slow(
            "glacial",
            10.0,
            Duration::from_secs(60),
        )]);
        let aggregator = PriceAggregator::with_defaults(registry, instant_rates());

        let started = tokio::time::Instant::now();
        let results = aggregator.collect_converted("myPhone27S").await.unwrap();
        let elapsed = started.elapsed();

        assert!(results.first().unwrap().outcome().is_timed_out());
        assert!(elapsed < Duration::from_millis(3500), "unbounded wait: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn results_keep_registry_order_when_first_provider_is_slowest() {
        let registry = registry_of(vec![
            FixedPriceProvider::slow("slowest", 1.0, Duration::from_secs(2)),
            FixedPriceProvider::new("quick", 2.0),
            FixedPriceProvider::new("quicker", 3.0),
        ]);
        let aggregator = PriceAggregator::with_defaults(registry, instant_rates());

        let results = aggregator.collect_concurrent("myPhone27S").await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.provider().as_str()).collect();
        assert_eq!(ids, ["slowest", "quick", "quicker"]);
    }

    #[tokio::test]
    async fn panicking_provider_becomes_failed_entry() {
        let providers: Vec<Arc<dyn PriceProvider>> = vec![
            Arc::new(PanickingProvider {
                id: ProviderId::new("broken"),
            }),
            Arc::new(FixedPriceProvider::new("fine", 5.0)),
        ];
        let aggregator =
            PriceAggregator::with_defaults(ProviderRegistry::new(providers), instant_rates());

        let results = aggregator.collect_concurrent("myPhone27S").await.unwrap();
        assert_eq!(results.len(), 2);

        let mut iter = results.iter();
        let broken = iter.next().unwrap();
        let fine = iter.next().unwrap();
        assert!(matches!(broken.outcome(), QuoteOutcome::Failed(_)));
        assert!(fine.outcome().is_priced());
    }

    #[tokio::test]
    async fn repeated_calls_agree_on_count_order_and_values() {
        let registry = ProviderRegistry::simulated(LatencyProfile::Zero);
        let aggregator = PriceAggregator::with_defaults(registry, instant_rates());

        let first = aggregator.collect_converted("myPhone27S").await.unwrap();
        let second = aggregator.collect_converted("myPhone27S").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn display_marks_timeouts_and_failures() {
        let priced = ProviderResult::new(
            ProviderId::new("BestPrice"),
            QuoteOutcome::Priced(
                Quote::new(ProviderId::new("BestPrice"), 123.456).in_currency(Currency::Usd),
            ),
        );
        assert_eq!(priced.to_string(), "BestPrice price is 123.46");

        let timed_out = ProviderResult::new(ProviderId::new("Slow"), QuoteOutcome::TimedOut);
        assert_eq!(timed_out.to_string(), "Slow price is unavailable (timed out)");

        let failed = ProviderResult::new(
            ProviderId::new("Odd"),
            QuoteOutcome::Failed("task panicked".to_string()),
        );
        assert_eq!(failed.to_string(), "Odd price is unavailable (task panicked)");
    }

    #[test]
    fn config_defaults() {
        let config = AggregationConfig::default();
        assert!((config.default_rate - 1.35).abs() < f64::EPSILON);
        assert_eq!(config.rate_timeout, Duration::from_secs(1));
        assert_eq!(config.pipeline_timeout, Duration::from_secs(3));
        assert_eq!(config.source_currency, Currency::Eur);
        assert_eq!(config.target_currency, Currency::Usd);
    }

    #[test]
    fn config_builder_overrides() {
        let config = AggregationConfig::default()
            .with_default_rate(1.1)
            .with_rate_timeout(Duration::from_millis(250))
            .with_pipeline_timeout(Duration::from_secs(10))
            .with_currencies(Currency::Gbp, Currency::Jpy);

        assert!((config.default_rate - 1.1).abs() < f64::EPSILON);
        assert_eq!(config.rate_timeout, Duration::from_millis(250));
        assert_eq!(config.pipeline_timeout, Duration::from_secs(10));
        assert_eq!(config.source_currency, Currency::Gbp);
        assert_eq!(config.target_currency, Currency::Jpy);
    }
}
