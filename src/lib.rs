//! api-factory - registry of configured JSON HTTP clients
//!
//! Register one or more backend base URLs, then ask the factory for typed
//! interfaces bound to them. Every client the factory builds carries a JSON
//! codec that tolerates `null`, `""` and string-encoded numbers in `f64`,
//! `i64` and `i32` fields, and optionally a request/response logging hook.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): errors, configuration models, endpoint
//!   descriptions and port traits
//! - **Infrastructure Layer** (`infrastructure`): HTTP clients, codec,
//!   configuration loading, logging
//! - **Service Layer** (`services`): the client registry
//! - **CLI Layer** (`cli`): the `api-factory` command-line interface
//!
//! # Example
//!
//! ```no_run
//! use api_factory::{api_interface, ApiFactory};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Account {
//!     pub id: i64,
//!     pub balance: f64,
//! }
//!
//! api_interface! {
//!     pub struct AccountApi {
//!         GET "accounts/{id}" => fn account(path id: i64) -> Account;
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let factory = ApiFactory::global();
//!     factory.add("https://api.example.com/")?;
//!
//!     let api: AccountApi = factory.create()?;
//!     let account = api.account(42).await?;
//!     println!("{account:?}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Used by `api_interface!` expansions
pub use reqwest;

// Re-export commonly used types for convenience
pub use domain::models::{BackendConfig, ClientKey, Config, Endpoint, NetworkConfig};
pub use domain::ports::NetworkDiagnostics;
pub use domain::{FactoryError, FactoryResult};
pub use infrastructure::codec::{JsonCodec, NumericDecodeError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::diagnostics::DiagnosticsFlag;
pub use infrastructure::http::{ApiClient, ApiError, ApiInterface, Call, ClientBuilder};
pub use services::ApiFactory;
