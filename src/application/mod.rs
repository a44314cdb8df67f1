//! # Application Layer
//!
//! Orchestration of the per-provider pipelines over the domain and
//! infrastructure layers.

pub mod error;
pub mod services;
