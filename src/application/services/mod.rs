//! # Application Services
//!
//! The aggregation engine and its execution modes.

pub mod aggregation;
pub mod execution_mode;

pub use aggregation::{
    AggregationConfig, PriceAggregator, ProviderResult, QuoteOutcome, DEFAULT_RATE,
    PIPELINE_TIMEOUT, RATE_TIMEOUT,
};
pub use execution_mode::{ExecutionMode, ParseExecutionModeError};
