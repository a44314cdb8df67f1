//! # Infrastructure Layer
//!
//! Ports and in-process adapters for the external capabilities the engine
//! depends on: price providers and the exchange-rate source.

pub mod providers;
pub mod rates;
