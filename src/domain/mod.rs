//! # Domain Layer
//!
//! Entities and value objects of the price-aggregation domain.

pub mod entities;
pub mod value_objects;
