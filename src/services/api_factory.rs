//! Registry of configured API clients.
//!
//! ```no_run
//! use api_factory::{api_interface, ApiFactory};
//! # use serde::Deserialize;
//! # #[derive(Deserialize)] pub struct Product { pub id: i64 }
//!
//! api_interface! {
//!     pub struct ProductApi {
//!         GET "products/{id}" => fn product(path id: i64) -> Product;
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = ApiFactory::global();
//! factory.add("https://api.example.com/")?;
//! factory.add_with_key("dev", "https://dev.example.com/")?;
//!
//! let api: ProductApi = factory.create()?;
//! let dev: ProductApi = factory.create_by_key("dev")?;
//! let product = api.product(7).await?;
//! # Ok(())
//! # }
//! ```

use crate::domain::models::{BackendConfig, ClientKey, Config, NetworkConfig};
use crate::domain::ports::NetworkDiagnostics;
use crate::domain::{FactoryError, FactoryResult};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::diagnostics::DiagnosticsFlag;
use crate::infrastructure::http::{ApiClient, ApiInterface, ClientBuilder};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

/// Key `create` resolves to: the first auto-indexed client.
pub const DEFAULT_KEY: &str = "0";

static GLOBAL_FACTORY: OnceLock<ApiFactory> = OnceLock::new();

/// Registry mapping string keys to configured [`ApiClient`]s.
///
/// Auto-indexed and explicit keys share one key space: `add` stores under
/// the current registry size, so an explicit key such as `"1"` can later be
/// replaced by the second auto-indexed client. Replacements are logged at
/// `warn`.
pub struct ApiFactory {
    clients: RwLock<HashMap<String, ApiClient>>,
    network: NetworkConfig,
    diagnostics: Arc<dyn NetworkDiagnostics>,
}

impl ApiFactory {
    /// Create an independent registry
    pub fn new(network: NetworkConfig, diagnostics: Arc<dyn NetworkDiagnostics>) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            network,
            diagnostics,
        }
    }

    /// Create a registry with its own diagnostics switch seeded from
    /// `config.network.log_traffic`
    pub fn from_config(config: &Config) -> Self {
        let flag = DiagnosticsFlag::new(config.network.log_traffic);
        Self::new(config.network.clone(), Arc::new(flag))
    }

    /// The process-wide registry, built on first access.
    ///
    /// Settings come from [`ConfigLoader::load`], falling back to defaults
    /// when loading fails. The global [`DiagnosticsFlag`] is switched on if
    /// the configuration asks for traffic logging.
    pub fn global() -> &'static Self {
        GLOBAL_FACTORY.get_or_init(|| {
            let config = ConfigLoader::load().unwrap_or_else(|err| {
                warn!(error = %err, "Failed to load configuration, using defaults");
                Config::default()
            });

            let flag = DiagnosticsFlag::global();
            if config.network.log_traffic {
                flag.set(true);
            }

            Self::new(config.network, Arc::new(flag.clone()))
        })
    }

    /// Build a client for `base_url` and store it under the next integer key.
    ///
    /// Returns the key used.
    pub fn add(&self, base_url: &str) -> FactoryResult<String> {
        self.add_optional(Some(base_url))
    }

    /// Like [`add`](Self::add), for callers whose base URL may be absent
    pub fn add_optional(&self, base_url: Option<&str>) -> FactoryResult<String> {
        let client = self.build_client(base_url)?;
        let mut clients = self.write();
        let key = clients.len().to_string();
        Self::store(&mut clients, key.clone(), client);
        Ok(key)
    }

    /// Build a client for `base_url` and store it under `key`, replacing any
    /// client already there
    pub fn add_with_key(&self, key: impl Into<ClientKey>, base_url: &str) -> FactoryResult<()> {
        let client = self.build_client(Some(base_url))?;
        Self::store(&mut self.write(), key.into().into_string(), client);
        Ok(())
    }

    /// Register configured backends in order, returning their keys
    pub fn register_backends(&self, backends: &[BackendConfig]) -> FactoryResult<Vec<String>> {
        backends
            .iter()
            .map(|backend| match &backend.key {
                Some(key) => self
                    .add_with_key(key, &backend.base_url)
                    .map(|()| key.clone()),
                None => self.add(&backend.base_url),
            })
            .collect()
    }

    /// Typed interface bound to the client under key `"0"`
    pub fn create<T: ApiInterface>(&self) -> FactoryResult<T> {
        self.create_by_key(DEFAULT_KEY)
    }

    /// Typed interface bound to the client under `index`'s string form
    pub fn create_by_index<T: ApiInterface>(&self, index: usize) -> FactoryResult<T> {
        self.create_by_key(index)
    }

    /// Typed interface bound to the client under `key`
    pub fn create_by_key<T: ApiInterface>(&self, key: impl Into<ClientKey>) -> FactoryResult<T> {
        self.client(key).map(T::bind)
    }

    /// Look up the raw client under `key`.
    ///
    /// An empty registry is a configuration error; a missing key is a
    /// lookup miss.
    pub fn client(&self, key: impl Into<ClientKey>) -> FactoryResult<ApiClient> {
        let key = key.into();
        let clients = self.read();
        if clients.is_empty() {
            return Err(FactoryError::NoClients);
        }
        clients
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| FactoryError::ClientNotFound(key.into_string()))
    }

    /// Whether a client is registered under `key`
    pub fn contains_key(&self, key: impl Into<ClientKey>) -> bool {
        self.read().contains_key(key.into().as_str())
    }

    /// Number of registered clients
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if no client is registered
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Drop every registered client
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Transport settings new clients are built with
    pub const fn network(&self) -> &NetworkConfig {
        &self.network
    }

    fn build_client(&self, base_url: Option<&str>) -> FactoryResult<ApiClient> {
        ClientBuilder::new(&self.network)
            .log_traffic(self.diagnostics.is_network_logging_enabled())
            .build_optional(base_url)
    }

    fn store(clients: &mut HashMap<String, ApiClient>, key: String, client: ApiClient) {
        let base_url = client.base_url().to_string();
        if let Some(previous) = clients.insert(key.clone(), client) {
            warn!(
                key = %key,
                replaced = %previous.base_url(),
                base_url = %base_url,
                "Replaced existing API client"
            );
        } else {
            info!(key = %key, base_url = %base_url, "Registered API client");
        }
    }

    // The map holds no cross-entry invariants, so a poisoned lock is still usable
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ApiClient>> {
        self.clients.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ApiClient>> {
        self.clients.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ApiFactory {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl fmt::Debug for ApiFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiFactory")
            .field("keys", &self.keys())
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Bound(ApiClient);

    impl ApiInterface for Bound {
        fn bind(client: ApiClient) -> Self {
            Self(client)
        }
    }

    #[test]
    fn test_first_add_gets_key_zero() {
        let factory = ApiFactory::default();
        let key = factory.add("https://api.example.com/").unwrap();
        assert_eq!(key, "0");

        let Bound(client) = factory.create::<Bound>().unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.example.com/");
    }

    #[test]
    fn test_auto_keys_follow_insertion_order() {
        let factory = ApiFactory::default();
        for i in 0..4 {
            let key = factory.add(&format!("https://api{i}.example.com/")).unwrap();
            assert_eq!(key, i.to_string());
        }

        for i in 0..4 {
            let Bound(client) = factory.create_by_index::<Bound>(i).unwrap();
            assert_eq!(client.base_url().host_str(), Some(format!("api{i}.example.com").as_str()));
        }
    }

    #[test]
    fn test_explicit_key() {
        let factory = ApiFactory::default();
        factory.add_with_key("dev", "https://dev.example.com/").unwrap();

        let Bound(client) = factory.create_by_key::<Bound>("dev").unwrap();
        assert_eq!(client.base_url().as_str(), "https://dev.example.com/");

        let err = factory.create_by_key::<Bound>("prod").unwrap_err();
        assert!(err.is_lookup_miss());
        assert!(matches!(err, FactoryError::ClientNotFound(key) if key == "prod"));
    }

    #[test]
    fn test_create_default_without_auto_key_is_lookup_miss() {
        let factory = ApiFactory::default();
        factory.add_with_key("dev", "https://dev.example.com/").unwrap();
        assert!(matches!(
            factory.create::<Bound>(),
            Err(FactoryError::ClientNotFound(key)) if key == DEFAULT_KEY
        ));
    }

    #[test]
    fn test_empty_registry_is_configuration_error() {
        let factory = ApiFactory::default();
        assert!(matches!(factory.create::<Bound>(), Err(FactoryError::NoClients)));
        assert!(matches!(factory.create_by_index::<Bound>(3), Err(FactoryError::NoClients)));
        assert!(matches!(
            factory.create_by_key::<Bound>("dev"),
            Err(FactoryError::NoClients)
        ));
    }

    #[test]
    fn test_empty_or_absent_base_url_rejected() {
        let factory = ApiFactory::default();
        assert!(matches!(factory.add(""), Err(FactoryError::EmptyBaseUrl)));
        assert!(matches!(factory.add_optional(None), Err(FactoryError::EmptyBaseUrl)));
        assert!(matches!(
            factory.add_with_key("dev", ""),
            Err(FactoryError::EmptyBaseUrl)
        ));
        assert!(factory.is_empty());
    }

    #[test]
    fn test_same_key_overrides() {
        let factory = ApiFactory::default();
        factory.add_with_key("dev", "https://old.example.com/").unwrap();
        factory.add_with_key("dev", "https://new.example.com/").unwrap();

        assert_eq!(factory.len(), 1);
        let client = factory.client("dev").unwrap();
        assert_eq!(client.base_url().as_str(), "https://new.example.com/");
    }

    #[test]
    fn test_explicit_numeric_key_aliases_auto_key() {
        let factory = ApiFactory::default();
        factory.add_with_key("1", "https://explicit.example.com/").unwrap();
        // Registry size is 1, so the next auto key is "1" and replaces it
        let key = factory.add("https://auto.example.com/").unwrap();

        assert_eq!(key, "1");
        assert_eq!(factory.len(), 1);
        assert_eq!(
            factory.client(1).unwrap().base_url().as_str(),
            "https://auto.example.com/"
        );
    }

    #[test]
    fn test_register_backends() {
        let factory = ApiFactory::default();
        let keys = factory
            .register_backends(&[
                BackendConfig {
                    key: None,
                    base_url: "https://api.example.com/".to_string(),
                },
                BackendConfig {
                    key: Some("dev".to_string()),
                    base_url: "https://dev.example.com/".to_string(),
                },
            ])
            .unwrap();

        assert_eq!(keys, vec!["0".to_string(), "dev".to_string()]);
        assert_eq!(factory.keys(), vec!["0".to_string(), "dev".to_string()]);
    }

    #[test]
    fn test_diagnostics_sampled_at_build_time() {
        let flag = DiagnosticsFlag::new(false);
        let factory = ApiFactory::new(NetworkConfig::default(), Arc::new(flag.clone()));

        factory.add("https://quiet.example.com/").unwrap();
        flag.set(true);
        factory.add("https://loud.example.com/").unwrap();
        flag.set(false);

        assert!(!factory.client(0).unwrap().logs_traffic());
        assert!(factory.client(1).unwrap().logs_traffic());
    }

    #[test]
    fn test_from_config_seeds_logging() {
        let mut config = Config::default();
        config.network.log_traffic = true;
        let factory = ApiFactory::from_config(&config);
        factory.add("https://api.example.com/").unwrap();
        assert!(factory.client("0").unwrap().logs_traffic());
    }

    #[test]
    fn test_clear() {
        let factory = ApiFactory::default();
        factory.add("https://api.example.com/").unwrap();
        assert!(factory.contains_key(0));
        factory.clear();
        assert!(factory.is_empty());
        assert!(!factory.contains_key("0"));
    }

    #[test]
    fn test_global_constructed_once_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| std::ptr::from_ref(ApiFactory::global()) as usize))
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(addresses[0], std::ptr::from_ref(ApiFactory::global()) as usize);
    }
}
