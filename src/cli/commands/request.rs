//! Implementation of the `api-factory request` command.

use anyhow::{Context, Result};
use clap::Args;
use reqwest::Method;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::parse_key_val;
use crate::domain::models::{Config, Endpoint};
use crate::services::{ApiFactory, DEFAULT_KEY};

/// Key the `--base-url` override is registered under
const ADHOC_KEY: &str = "cli";

/// Arguments of `api-factory request`
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE, ...)
    pub method: String,

    /// Path relative to the backend's base URL
    pub path: String,

    /// Registry key of the backend to use (defaults to the first backend)
    #[arg(short, long, conflicts_with = "base_url")]
    pub backend: Option<String>,

    /// Use this base URL instead of the configured backends
    #[arg(long)]
    pub base_url: Option<String>,

    /// Query parameter as KEY=VALUE (repeatable)
    #[arg(short, long, value_parser = parse_key_val)]
    pub query: Vec<(String, String)>,

    /// Request header as NAME=VALUE (repeatable)
    #[arg(short = 'H', long, value_parser = parse_key_val)]
    pub header: Vec<(String, String)>,

    /// JSON request body
    #[arg(short = 'd', long)]
    pub body: Option<String>,

    /// Log request and response traffic for this invocation
    #[arg(long)]
    pub log_traffic: bool,
}

/// Output of `request`
#[derive(Debug, Serialize)]
pub struct RequestOutput {
    /// Registry key the request went through
    pub key: String,
    /// Resolved request URL
    pub url: String,
    /// Decoded response body
    pub response: serde_json::Value,
}

impl CommandOutput for RequestOutput {
    fn to_human(&self) -> String {
        serde_json::to_string_pretty(&self.response).unwrap_or_else(|_| self.response.to_string())
    }
}

/// Register backends, send one request and print the response
pub async fn execute(args: RequestArgs, mut config: Config, json_mode: bool) -> Result<()> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{}'", args.method))?;

    let body = args
        .body
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("Request body is not valid JSON")?;

    if args.log_traffic {
        config.network.log_traffic = true;
    }

    let factory = ApiFactory::from_config(&config);
    let key = if let Some(base_url) = &args.base_url {
        factory
            .add_with_key(ADHOC_KEY, base_url)
            .context("Failed to register --base-url")?;
        ADHOC_KEY.to_string()
    } else {
        factory
            .register_backends(&config.backends)
            .context("Failed to register configured backends")?;
        args.backend.clone().unwrap_or_else(|| DEFAULT_KEY.to_string())
    };

    let client = factory
        .client(key.as_str())
        .with_context(|| format!("No client available for backend '{key}'"))?;

    let endpoint = Endpoint::new(method, args.path.clone());
    let mut call = client.call(&endpoint);
    for (name, value) in &args.query {
        call = call.query(name, value);
    }
    for (name, value) in &args.header {
        call = call.header(name, value);
    }
    if let Some(body) = &body {
        call = call.json(body);
    }

    let url = client
        .base_url()
        .join(&args.path)
        .map_or_else(|_| args.path.clone(), |url| url.to_string());

    let response: serde_json::Value = call
        .send()
        .await
        .with_context(|| format!("{} {url} failed", endpoint.method()))?;

    output(&RequestOutput { key, url, response }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_human_output_prints_response_only() {
        let output_data = RequestOutput {
            key: "0".to_string(),
            url: "https://api.example.com/items".to_string(),
            response: json!({"id": 1}),
        };
        let rendered = output_data.to_human();
        assert!(rendered.contains("\"id\": 1"));
        assert!(!rendered.contains("api.example.com"));
    }

    #[test]
    fn test_json_output_includes_key_and_url() {
        let output_data = RequestOutput {
            key: "dev".to_string(),
            url: "https://dev.example.com/items".to_string(),
            response: json!([1, 2]),
        };
        let value = output_data.to_json();
        assert_eq!(value["key"], "dev");
        assert_eq!(value["url"], "https://dev.example.com/items");
        assert_eq!(value["response"], json!([1, 2]));
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_body() {
        let args = RequestArgs {
            method: "post".to_string(),
            path: "items".to_string(),
            backend: None,
            base_url: Some("https://api.example.com/".to_string()),
            query: Vec::new(),
            header: Vec::new(),
            body: Some("{not json".to_string()),
            log_traffic: false,
        };
        let err = execute(args, Config::default(), false).await.unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[tokio::test]
    async fn test_execute_without_backends_fails() {
        let args = RequestArgs {
            method: "GET".to_string(),
            path: "items".to_string(),
            backend: None,
            base_url: None,
            query: Vec::new(),
            header: Vec::new(),
            body: None,
            log_traffic: false,
        };
        let err = execute(args, Config::default(), false).await.unwrap_err();
        assert!(err.to_string().contains("No client available"));
    }
}
