//! Generic request dispatch: argument binding and response decoding.

use super::client::ApiClient;
use super::error::ApiError;
use crate::domain::models::Endpoint;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use tracing::debug;

/// One pending request against an endpoint.
///
/// Arguments are bound with the builder methods; problems with them
/// (unencodable body, bad header, missing placeholder) surface as an
/// `ApiError` when the call is sent.
#[derive(Debug)]
#[must_use = "a call does nothing until it is sent"]
pub struct Call {
    client: ApiClient,
    method: Method,
    path: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    error: Option<ApiError>,
}

impl Call {
    pub(crate) fn new(client: ApiClient, endpoint: &Endpoint) -> Self {
        Self {
            client,
            method: endpoint.method().clone(),
            path: endpoint.path().to_string(),
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            error: None,
        }
    }

    /// Fill the `{name}` placeholder; the value is percent-encoded
    pub fn path_param(mut self, name: &str, value: impl Display) -> Self {
        self.path_params.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter.
    ///
    /// `None`/`null` values are skipped and sequences repeat the parameter
    /// once per element.
    pub fn query<V: Serialize + ?Sized>(mut self, name: &str, value: &V) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                if let Err(reason) = flatten_query(name, value, &mut self.query) {
                    self.fail(ApiError::InvalidQuery {
                        name: name.to_string(),
                        reason,
                    });
                }
            }
            Err(err) => self.fail(ApiError::InvalidQuery {
                name: name.to_string(),
                reason: err.to_string(),
            }),
        }
        self
    }

    /// Set a request header
    pub fn header(mut self, name: &str, value: impl Display) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Encode `body` as the JSON request body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match self.client.codec().encode(body) {
            Ok(bytes) => self.body = Some(bytes),
            Err(err) => self.fail(ApiError::Encode(err)),
        }
        self
    }

    /// Send the call and decode the response body into `R` with the
    /// client's lenient codec
    pub async fn send<R: DeserializeOwned>(self) -> Result<R, ApiError> {
        let client = self.client.clone();
        let request = self.into_request()?;
        let body = client.execute(request).await?;
        client.codec().decode(&body).map_err(ApiError::Decode)
    }

    /// Send the call and discard the response body
    pub async fn send_empty(self) -> Result<(), ApiError> {
        let client = self.client.clone();
        let request = self.into_request()?;
        client.execute(request).await.map(drop)
    }

    /// Send the call and return the response body as text
    pub async fn send_text(self) -> Result<String, ApiError> {
        let client = self.client.clone();
        let request = self.into_request()?;
        let body = client.execute(request).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn fail(&mut self, error: ApiError) {
        // Keep the first problem; later ones are usually consequences
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn into_request(self) -> Result<Request, ApiError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let path = render_path(&self.path, &self.path_params)?;
        let mut url = self.client.base_url().join(&path)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        debug!(method = %self.method, url = %url, "building request");

        let mut builder = self.client.http().request(self.method, url);
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            builder = builder.header(header_name, header_value);
        }
        if let Some(body) = self.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        Ok(builder.build()?)
    }
}

/// Substitute `{name}` placeholders with percent-encoded values
pub fn render_path(template: &str, params: &[(String, String)]) -> Result<String, ApiError> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|offset| open + offset) else {
            break;
        };
        let name = &rest[open + 1..close];
        let value = params
            .iter()
            .rev()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
            .ok_or_else(|| ApiError::MissingPathParam(name.to_string()))?;

        // Dot segments survive encoding and would be resolved by the URL join
        if matches!(value.as_str(), "." | "..") {
            return Err(ApiError::InvalidPathParam {
                name: name.to_string(),
                value: value.clone(),
            });
        }

        rendered.push_str(&rest[..open]);
        rendered.push_str(&urlencoding::encode(value));
        rest = &rest[close + 1..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}

fn flatten_query(
    name: &str,
    value: Value,
    out: &mut Vec<(String, String)>,
) -> Result<(), String> {
    match value {
        Value::Null => Ok(()),
        Value::String(text) => {
            out.push((name.to_string(), text));
            Ok(())
        }
        Value::Bool(_) | Value::Number(_) => {
            out.push((name.to_string(), value.to_string()));
            Ok(())
        }
        Value::Array(items) => items
            .into_iter()
            .try_for_each(|item| match item {
                Value::Array(_) => Err("nested arrays cannot be flattened".to_string()),
                item => flatten_query(name, item, out),
            }),
        Value::Object(_) => Err("objects cannot be flattened".to_string()),
    }
}
