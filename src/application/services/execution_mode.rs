//! # Execution Modes
//!
//! Interchangeable orchestration strategies over the aggregation
//! primitives.
//!
//! All modes produce a result list of the same length and provider order;
//! they differ only in latency and failure-handling characteristics, which
//! makes them useful for comparative testing and benchmarking.

use crate::application::error::AggregationResult;
use crate::application::services::aggregation::PriceAggregator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Orchestration strategy for one aggregation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// One provider at a time, no concurrency.
    Sequential,
    /// Order-preserving parallel map, no explicit task objects.
    Buffered,
    /// One spawned task per provider, joined in registry order.
    Concurrent,
    /// Full pipeline with currency conversion and deadlines.
    Converted,
}

impl ExecutionMode {
    /// All modes, in roughly increasing sophistication.
    pub const ALL: [Self; 4] = [
        Self::Sequential,
        Self::Buffered,
        Self::Concurrent,
        Self::Converted,
    ];
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Buffered => write!(f, "buffered"),
            Self::Concurrent => write!(f, "concurrent"),
            Self::Converted => write!(f, "converted"),
        }
    }
}

/// Error returned when parsing an [`ExecutionMode`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown execution mode: {0}")]
pub struct ParseExecutionModeError(String);

impl FromStr for ExecutionMode {
    type Err = ParseExecutionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "buffered" => Ok(Self::Buffered),
            "concurrent" => Ok(Self::Concurrent),
            "converted" => Ok(Self::Converted),
            other => Err(ParseExecutionModeError(other.to_string())),
        }
    }
}

impl PriceAggregator {
    /// Finds prices for a product using the given execution mode.
    ///
    /// Returns one formatted line per provider, in registry order. Entries
    /// whose pipeline timed out or failed carry an explicit marker instead
    /// of a price.
    ///
    /// # Errors
    ///
    /// Returns [`crate::application::error::AggregationError::NoProviders`]
    /// if the registry is empty.
    pub async fn find_prices(
        &self,
        product: &str,
        mode: ExecutionMode,
    ) -> AggregationResult<Vec<String>> {
        let results = match mode {
            ExecutionMode::Sequential => self.collect_sequential(product).await?,
            ExecutionMode::Buffered => self.collect_buffered(product).await?,
            ExecutionMode::Concurrent => self.collect_concurrent(product).await?,
            ExecutionMode::Converted => self.collect_converted(product).await?,
        };
        Ok(results.iter().map(ToString::to_string).collect())
    }
}
