//! # Domain Entities
//!
//! Core domain objects produced and consumed by the aggregation pipeline.

pub mod quote;

pub use quote::{ConvertedQuote, Quote};
