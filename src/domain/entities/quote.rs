//! # Quote Entity
//!
//! Represents a price quote from a provider.
//!
//! This module provides the [`Quote`] entity, an untransformed price as
//! returned by a single provider, and [`ConvertedQuote`], the result of
//! combining a quote with a [`ConversionRate`] at the pipeline's join point.
//!
//! # Examples
//!
//! ```
//! use price_aggregator::domain::entities::quote::Quote;
//! use price_aggregator::domain::value_objects::{ConversionRate, Currency, ProviderId};
//!
//! let quote = Quote::new(ProviderId::new("BestPrice"), 100.0);
//! let rate = ConversionRate::new(Currency::Eur, Currency::Usd, 1.35);
//! let converted = quote.convert(&rate);
//!
//! assert!((converted.price() - 135.0).abs() < f64::EPSILON);
//! assert_eq!(converted.currency(), Currency::Usd);
//! ```

use crate::domain::value_objects::{ConversionRate, Currency, ProviderId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An untransformed price quote from one provider.
///
/// Immutable once created. The price is denominated in the provider's own
/// currency; conversion into a target currency happens at the aggregation
/// join point via [`Quote::convert`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// The provider that produced this quote.
    provider: ProviderId,
    /// The raw price value.
    price: f64,
}

impl Quote {
    /// Creates a new quote.
    #[must_use]
    pub const fn new(provider: ProviderId, price: f64) -> Self {
        Self { provider, price }
    }

    /// Returns the provider that produced this quote.
    #[inline]
    #[must_use]
    pub const fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the raw price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Combines this quote with a conversion rate.
    ///
    /// The result is denominated in the rate's target currency.
    #[must_use]
    pub fn convert(self, rate: &ConversionRate) -> ConvertedQuote {
        ConvertedQuote {
            provider: self.provider,
            price: rate.apply(self.price),
            currency: rate.target(),
        }
    }

    /// Tags this quote with a currency without converting it.
    ///
    /// Used by execution modes that skip currency conversion.
    #[must_use]
    pub fn in_currency(self, currency: Currency) -> ConvertedQuote {
        ConvertedQuote {
            provider: self.provider,
            price: self.price,
            currency,
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} price is {:.2}", self.provider, self.price)
    }
}

/// A quote expressed in a target currency.
///
/// Derived by combining a [`Quote`] and a [`ConversionRate`]; it has no
/// independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedQuote {
    /// The provider that produced the underlying quote.
    provider: ProviderId,
    /// The price in the target currency.
    price: f64,
    /// The currency the price is denominated in.
    currency: Currency,
}

impl ConvertedQuote {
    /// Returns the provider that produced the underlying quote.
    #[inline]
    #[must_use]
    pub const fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the price in the target currency.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Returns the currency the price is denominated in.
    #[inline]
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for ConvertedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} price is {:.2}", self.provider, self.price)
    }
}
