//! Client construction and the shared send path.

use super::call::Call;
use super::error::ApiError;
use super::interface::ApiInterface;
use super::logging_hook::NetworkLogger;
use crate::domain::models::{Endpoint, NetworkConfig};
use crate::domain::{FactoryError, FactoryResult};
use crate::infrastructure::codec::JsonCodec;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Request, Url};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// A configured HTTP client bound to one base URL.
///
/// Immutable once built and cheap to clone: clones share the connection
/// pool, codec and logging hook.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: Url,
    http: ReqwestClient,
    codec: JsonCodec,
    logger: Option<NetworkLogger>,
}

impl ApiClient {
    /// Normalized base URL, always ending in `/`
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Codec used for request and response bodies
    pub fn codec(&self) -> &JsonCodec {
        &self.inner.codec
    }

    /// Whether this client was built with the network logging hook
    pub fn logs_traffic(&self) -> bool {
        self.inner.logger.is_some()
    }

    /// Start a call against `endpoint`, resolved beneath the base URL
    pub fn call(&self, endpoint: &Endpoint) -> Call {
        Call::new(self.clone(), endpoint)
    }

    /// Materialize a typed interface bound to this client
    pub fn create<T: ApiInterface>(&self) -> T {
        T::bind(self.clone())
    }

    pub(crate) fn http(&self) -> &ReqwestClient {
        &self.inner.http
    }

    /// Send a built request and return the body of a successful response.
    ///
    /// Non-success statuses become `ApiError::Status` carrying the body text.
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub(crate) async fn execute(&self, request: Request) -> Result<Vec<u8>, ApiError> {
        let method = request.method().clone();
        let url = request.url().clone();

        if let Some(logger) = &self.inner.logger {
            logger.log_request(&request);
        }

        let started = Instant::now();
        let response = match self.inner.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                if let Some(logger) = &self.inner.logger {
                    logger.log_failure(&method, &url, &err, started.elapsed());
                }
                return Err(ApiError::Transport(err));
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if let Some(logger) = &self.inner.logger {
            logger.log_response(&method, &url, status, &headers, &body, started.elapsed());
        }

        debug!(%status, bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("logs_traffic", &self.logs_traffic())
            .finish_non_exhaustive()
    }
}

/// Builds `ApiClient`s from a base URL and the shared network settings.
#[derive(Debug, Clone, Copy)]
pub struct ClientBuilder<'a> {
    network: &'a NetworkConfig,
    log_traffic: bool,
}

impl<'a> ClientBuilder<'a> {
    /// Builder using `network` transport settings, traffic logging off
    pub const fn new(network: &'a NetworkConfig) -> Self {
        Self {
            network,
            log_traffic: false,
        }
    }

    /// Attach the request/response logging hook
    #[must_use]
    pub const fn log_traffic(mut self, enabled: bool) -> Self {
        self.log_traffic = enabled;
        self
    }

    /// Build a client for `base_url`
    pub fn build(&self, base_url: &str) -> FactoryResult<ApiClient> {
        self.build_optional(Some(base_url))
    }

    /// Build a client, failing immediately on an absent or empty base URL
    pub fn build_optional(&self, base_url: Option<&str>) -> FactoryResult<ApiClient> {
        let base_url = normalize_base_url(base_url)?;

        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(self.network.timeout_secs))
            .connect_timeout(Duration::from_secs(self.network.connect_timeout_secs))
            .user_agent(self.network.user_agent.as_str())
            .default_headers(default_headers(self.network)?)
            .gzip(true)
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()?;

        let logger = self
            .log_traffic
            .then(|| NetworkLogger::new(self.network.max_logged_body_bytes));

        info!(
            base_url = %base_url,
            timeout_secs = self.network.timeout_secs,
            log_traffic = logger.is_some(),
            "Built API client"
        );

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                base_url,
                http,
                codec: JsonCodec::new(),
                logger,
            }),
        })
    }
}

/// Parse and normalize a base URL: absolute http(s), trailing `/` appended.
pub fn normalize_base_url(raw: Option<&str>) -> FactoryResult<Url> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(FactoryError::EmptyBaseUrl),
    };

    let mut url = Url::parse(raw).map_err(|source| FactoryError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FactoryError::UnsupportedScheme(url.scheme().to_string()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Convert configured default headers into a transport header map
pub fn default_headers(network: &NetworkConfig) -> FactoryResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &network.default_headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| FactoryError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| FactoryError::InvalidHeader(name.clone()))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
