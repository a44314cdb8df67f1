//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`ProviderId`]: string-based provider identifier
//! - [`Currency`]: supported currencies
//! - [`ConversionRate`]: multiplicative factor between two currencies

pub mod currency;
pub mod ids;

pub use currency::{ConversionRate, Currency, ParseCurrencyError};
pub use ids::ProviderId;
