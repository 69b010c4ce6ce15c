//! Network diagnostics port.

/// Source of the "verbose network diagnostics" switch.
///
/// The factory samples this once per client build. Clients built while the
/// switch is on keep their logging hook for their whole lifetime.
pub trait NetworkDiagnostics: Send + Sync {
    /// Whether new clients should log their traffic
    fn is_network_logging_enabled(&self) -> bool;
}
