//! Port trait definitions
//!
//! Contracts the factory consumes without depending on a concrete source:
//! - `NetworkDiagnostics`: whether verbose network logging is enabled

/// Diagnostics switch
pub mod diagnostics;

pub use diagnostics::NetworkDiagnostics;
