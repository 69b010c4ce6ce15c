//! Infrastructure layer module
//!
//! Adapters over the third-party stack:
//! - HTTP clients, call dispatch and the traffic logging hook (reqwest)
//! - JSON codec with lenient numeric decoding (serde_json)
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - The process-wide network diagnostics switch

pub mod codec;
pub mod config;
pub mod diagnostics;
pub mod http;
pub mod logging;
