//! # Identifier Types
//!
//! String-based identifiers for domain objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a price provider.
///
/// Providers are identified by their display name; the id doubles as the
/// label used in formatted result lines.
///
/// # Examples
///
/// ```
/// use price_aggregator::domain::value_objects::ids::ProviderId;
///
/// let id = ProviderId::new("BestPrice");
/// assert_eq!(id.as_str(), "BestPrice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a new provider id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
