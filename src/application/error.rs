//! # Application Errors
//!
//! Error types for the aggregation layer.
//!
//! Per-provider problems (timeouts, panicked tasks) are not errors at this
//! level; they surface as tagged outcomes inside the result list. An
//! [`AggregationError`] means the call as a whole could not proceed.

use thiserror::Error;

/// Error type for aggregation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// The provider registry is empty.
    #[error("no providers registered")]
    NoProviders,
}

/// Result type for aggregation operations.
pub type AggregationResult<T> = Result<T, AggregationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_providers_display() {
        assert_eq!(
            AggregationError::NoProviders.to_string(),
            "no providers registered"
        );
    }
}
