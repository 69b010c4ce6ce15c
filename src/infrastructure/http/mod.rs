//! HTTP client infrastructure
//!
//! - `ClientBuilder` turns a base URL plus network settings into an `ApiClient`
//! - `Call` is the generic dispatch path typed interfaces are built on
//! - `NetworkLogger` is the optional request/response logging hook

/// Generic dispatch
pub mod call;
/// Client and builder
pub mod client;
/// Call errors
pub mod error;
/// Typed interfaces
pub mod interface;
/// Traffic logging
pub mod logging_hook;

pub use call::Call;
pub use client::{normalize_base_url, ApiClient, ClientBuilder};
pub use error::ApiError;
pub use interface::ApiInterface;
pub use logging_hook::{NetworkLogger, NETWORK_LOG_TARGET};
