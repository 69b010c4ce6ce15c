//! Configuration models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration structure for the API client factory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Transport settings applied to every client the factory builds
    #[serde(default)]
    pub network: NetworkConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Backends registered at startup, in order
    #[serde(default)]
    pub backends: Vec<BackendConfig>,
}

/// Transport settings shared by all clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NetworkConfig {
    /// Initial value of the process-wide network diagnostics flag.
    /// When the flag is set at build time, the client logs full
    /// request/response details.
    #[serde(default)]
    pub log_traffic: bool,

    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Headers attached to every request
    #[serde(default)]
    pub default_headers: HashMap<String, String>,

    /// Bodies longer than this are truncated in traffic logs
    #[serde(default = "default_max_logged_body_bytes")]
    pub max_logged_body_bytes: usize,
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("api-factory/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_max_logged_body_bytes() -> usize {
    16 * 1024
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            log_traffic: false,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
            default_headers: HashMap::new(),
            max_logged_body_bytes: default_max_logged_body_bytes(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stdout
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for log files (if None logs only to stdout)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// Stdout log format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured JSON lines
    Json,
    /// Human-readable multi-line output
    #[default]
    Pretty,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file every day
    #[default]
    Daily,
    /// New file every hour
    Hourly,
    /// Single file
    Never,
}

/// One backend registered with the factory at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BackendConfig {
    /// Explicit registry key. Auto-indexed when absent.
    #[serde(default)]
    pub key: Option<String>,

    /// Root address endpoint paths are resolved against
    pub base_url: String,
}
