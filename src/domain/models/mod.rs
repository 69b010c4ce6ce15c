//! Domain models: configuration, endpoints and registry keys.

/// Registry keys
pub mod client_key;
/// Configuration
pub mod config;
/// Endpoints
pub mod endpoint;

pub use client_key::ClientKey;
pub use config::{
    BackendConfig, Config, LogFormat, LoggingConfig, NetworkConfig, RotationPolicy,
};
pub use endpoint::Endpoint;
