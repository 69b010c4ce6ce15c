//! Configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use reqwest::header::{HeaderName, HeaderValue};
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::infrastructure::logging::logger::parse_log_level;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Request timeout of zero
    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    /// Connect timeout of zero
    #[error("Invalid connect_timeout_secs: {0}. Must be at least 1")]
    InvalidConnectTimeout(u64),

    /// Body logging limit of zero
    #[error("Invalid max_logged_body_bytes: {0}. Must be at least 1")]
    InvalidMaxLoggedBody(usize),

    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Default header name or value the transport rejects
    #[error("Invalid default header '{0}'")]
    InvalidDefaultHeader(String),

    /// Empty user agent
    #[error("User agent cannot be empty")]
    EmptyUserAgent,

    /// Backend at this index has no base URL
    #[error("Backend {0} has an empty base_url")]
    EmptyBackendUrl(usize),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .api-factory/config.yaml (project config)
    /// 3. .api-factory/local.yaml (project local overrides, optional)
    /// 4. Environment variables (`API_FACTORY_*` prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("API_FACTORY_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            // 1. Start with programmatic defaults
            .merge(Serialized::defaults(Config::default()))
            // 2. Merge project config
            .merge(Yaml::file(".api-factory/config.yaml"))
            // 3. Merge project local overrides
            .merge(Yaml::file(".api-factory/local.yaml"))
            // 4. Merge environment variables (highest priority)
            .merge(Env::prefixed("API_FACTORY_").split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let network = &config.network;

        if network.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(network.timeout_secs));
        }

        if network.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidConnectTimeout(
                network.connect_timeout_secs,
            ));
        }

        if network.max_logged_body_bytes == 0 {
            return Err(ConfigError::InvalidMaxLoggedBody(
                network.max_logged_body_bytes,
            ));
        }

        if network.user_agent.is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }

        for (name, value) in &network.default_headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                return Err(ConfigError::InvalidDefaultHeader(name.clone()));
            }
        }

        if parse_log_level(&config.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        // Empty URLs are caught here so a bad file fails at load, not at registration
        if let Some(index) = config
            .backends
            .iter()
            .position(|backend| backend.base_url.is_empty())
        {
            return Err(ConfigError::EmptyBackendUrl(index));
        }

        Ok(())
    }
}
