//! Process-wide network diagnostics switch

use crate::domain::ports::NetworkDiagnostics;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static GLOBAL_FLAG: OnceLock<DiagnosticsFlag> = OnceLock::new();

/// Shared on/off switch for verbose network logging.
///
/// Clones share the same switch. The factory reads it each time it builds a
/// client, so flipping it affects only clients built afterwards.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsFlag {
    enabled: Arc<AtomicBool>,
}

impl DiagnosticsFlag {
    /// Standalone flag, independent of the global one
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    /// The process-global switch, off until something enables it
    pub fn global() -> &'static Self {
        GLOBAL_FLAG.get_or_init(Self::default)
    }

    /// Switch network logging on or off for clients built from now on
    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Current state of the switch
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

impl NetworkDiagnostics for DiagnosticsFlag {
    fn is_network_logging_enabled(&self) -> bool {
        self.is_enabled()
    }
}
