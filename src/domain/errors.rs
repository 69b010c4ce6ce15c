//! Domain errors for the API client factory.

use thiserror::Error;

/// Errors raised while building clients or looking them up in the registry.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Base URL was absent or empty
    #[error("Base URL cannot be empty")]
    EmptyBaseUrl,

    /// Base URL did not parse as an absolute URL
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// The rejected input
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// Scheme other than http or https
    #[error("Unsupported base URL scheme '{0}': expected http or https")]
    UnsupportedScheme(String),

    /// Registry is empty
    #[error("No API clients registered: add a base URL before creating interfaces")]
    NoClients,

    /// No client under the requested key
    #[error("No API client registered under key '{0}'")]
    ClientNotFound(String),

    /// Configured default header the transport rejects
    #[error("Invalid default header '{0}'")]
    InvalidHeader(String),

    /// Transport failed to initialize
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

impl FactoryError {
    /// Returns true if a lookup referenced a key that was never registered.
    pub const fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::ClientNotFound(_))
    }

    /// Returns true for configuration faults: bad base URLs, an empty
    /// registry, or settings the transport rejected.
    pub const fn is_configuration(&self) -> bool {
        !self.is_lookup_miss()
    }
}

/// Result alias for registry operations
pub type FactoryResult<T> = Result<T, FactoryError>;
