//! # Currency Types
//!
//! Currency enumeration and conversion rate value object.
//!
//! This module provides [`Currency`], the set of currencies the engine can
//! convert between, and [`ConversionRate`], the multiplicative factor used
//! to convert a price from one currency to another.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A currency supported by the conversion pipeline.
///
/// # Examples
///
/// ```
/// use price_aggregator::domain::value_objects::currency::Currency;
///
/// assert_eq!(Currency::Eur.to_string(), "EUR");
/// assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro.
    Eur,
    /// US dollar.
    Usd,
    /// British pound.
    Gbp,
    /// Japanese yen.
    Jpy,
    /// Swiss franc.
    Chf,
}

impl Currency {
    /// Nominal units of this currency per one euro.
    ///
    /// Used by the simulated rate source to derive a deterministic cross
    /// rate for any currency pair.
    #[inline]
    #[must_use]
    pub const fn units_per_eur(self) -> f64 {
        match self {
            Self::Eur => 1.0,
            Self::Usd => 1.35,
            Self::Gbp => 0.87,
            Self::Jpy => 128.0,
            Self::Chf => 1.08,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eur => write!(f, "EUR"),
            Self::Usd => write!(f, "USD"),
            Self::Gbp => write!(f, "GBP"),
            Self::Jpy => write!(f, "JPY"),
            Self::Chf => write!(f, "CHF"),
        }
    }
}

/// Error returned when parsing a [`Currency`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown currency: {0}")]
pub struct ParseCurrencyError(String);

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            "GBP" => Ok(Self::Gbp),
            "JPY" => Ok(Self::Jpy),
            "CHF" => Ok(Self::Chf),
            other => Err(ParseCurrencyError(other.to_string())),
        }
    }
}

/// A conversion rate between two currencies.
///
/// Converting a price means multiplying it by `factor`. A rate may carry a
/// fallback factor substituted when the real fetch did not complete in time;
/// the value object itself does not distinguish the two cases.
///
/// # Examples
///
/// ```
/// use price_aggregator::domain::value_objects::currency::{ConversionRate, Currency};
///
/// let rate = ConversionRate::new(Currency::Eur, Currency::Usd, 1.35);
/// assert!((rate.apply(100.0) - 135.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRate {
    /// Source currency.
    from: Currency,
    /// Target currency.
    to: Currency,
    /// Multiplicative conversion factor.
    factor: f64,
}

impl ConversionRate {
    /// Creates a new conversion rate.
    #[must_use]
    pub const fn new(from: Currency, to: Currency, factor: f64) -> Self {
        Self { from, to, factor }
    }

    /// Returns the source currency.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> Currency {
        self.from
    }

    /// Returns the target currency.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> Currency {
        self.to
    }

    /// Returns the conversion factor.
    #[inline]
    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }

    /// Converts an amount in the source currency to the target currency.
    #[inline]
    #[must_use]
    pub fn apply(&self, amount: f64) -> f64 {
        amount * self.factor
    }
}

impl fmt::Display for ConversionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {:.4}", self.from, self.to, self.factor)
    }
}
