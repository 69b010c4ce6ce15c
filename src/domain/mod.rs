//! Domain layer for the API client factory
//!
//! This module contains the registry's error taxonomy, configuration models,
//! endpoint descriptions and the port traits infrastructure adapters implement.

pub mod errors;
/// Configuration, endpoint and key models
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{FactoryError, FactoryResult};
