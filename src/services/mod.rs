//! Service layer
//!
//! - `api_factory`: the registry of configured clients

pub mod api_factory;

pub use api_factory::{ApiFactory, DEFAULT_KEY};
