//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stderr output
//! - Optional rolling JSON log files
//! - Secret scrubbing for logged network traffic

/// Subscriber setup
pub mod logger;
/// Secret redaction
pub mod secret_scrubbing;

pub use logger::LoggerImpl;
pub use secret_scrubbing::SecretScrubber;
