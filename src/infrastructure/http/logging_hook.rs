//! Request/response logging hook for clients built with network diagnostics on.

use crate::infrastructure::logging::SecretScrubber;
use reqwest::header::HeaderMap;
use reqwest::{Method, Request, StatusCode, Url};
use std::time::Duration;
use tracing::{info, warn};

/// Target every traffic log line is emitted under.
pub const NETWORK_LOG_TARGET: &str = "api_factory::network";

/// Request/response logging hook attached to a client when network
/// diagnostics were enabled at build time.
///
/// Header values, URLs and bodies are scrubbed of credentials; bodies are
/// cut at `max_body_bytes`.
#[derive(Debug, Clone)]
pub struct NetworkLogger {
    scrubber: SecretScrubber,
    max_body_bytes: usize,
}

impl NetworkLogger {
    /// Create a hook that shows at most `max_body_bytes` of each body
    pub const fn new(max_body_bytes: usize) -> Self {
        Self {
            scrubber: SecretScrubber::new(),
            max_body_bytes,
        }
    }

    /// Log an outgoing request before it is sent
    pub fn log_request(&self, request: &Request) {
        let body = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map(|bytes| self.render_body(bytes))
            .unwrap_or_default();

        info!(
            target: NETWORK_LOG_TARGET,
            method = %request.method(),
            url = %self.scrubber.scrub_message(request.url().as_str()),
            headers = %self.render_headers(request.headers()),
            body = %body,
            "--> request"
        );
    }

    /// Log a received response with its status and elapsed time
    pub fn log_response(
        &self,
        method: &Method,
        url: &Url,
        status: StatusCode,
        headers: &HeaderMap,
        body: &[u8],
        elapsed: Duration,
    ) {
        info!(
            target: NETWORK_LOG_TARGET,
            method = %method,
            url = %self.scrubber.scrub_message(url.as_str()),
            status = status.as_u16(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            headers = %self.render_headers(headers),
            body = %self.render_body(body),
            "<-- response"
        );
    }

    /// Log a transport failure
    pub fn log_failure(&self, method: &Method, url: &Url, error: &reqwest::Error, elapsed: Duration) {
        warn!(
            target: NETWORK_LOG_TARGET,
            method = %method,
            url = %self.scrubber.scrub_message(url.as_str()),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            error = %error,
            "<-- failed"
        );
    }

    /// Render headers as `name: value` pairs with secrets redacted
    pub fn render_headers(&self, headers: &HeaderMap) -> String {
        headers
            .iter()
            .map(|(name, value)| {
                let value = value.to_str().unwrap_or("<binary>");
                format!("{name}: {}", self.scrubber.scrub_header(name, value))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Render a body for logging, scrubbed and truncated
    pub fn render_body(&self, body: &[u8]) -> String {
        if body.is_empty() {
            return String::new();
        }
        let shown = &body[..body.len().min(self.max_body_bytes)];
        let mut rendered = self.scrubber.scrub_message(&String::from_utf8_lossy(shown));
        if body.len() > self.max_body_bytes {
            rendered.push_str(&format!("... ({} bytes total)", body.len()));
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    #[test]
    fn test_render_headers_redacts_credentials() {
        let logger = NetworkLogger::new(1024);
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));

        let rendered = logger.render_headers(&headers);
        assert!(rendered.contains("content-type: application/json"));
        assert!(rendered.contains("authorization: [REDACTED]"));
        assert!(!rendered.contains("abc.def"));
    }

    #[test]
    fn test_render_body_truncates() {
        let logger = NetworkLogger::new(4);
        assert_eq!(logger.render_body(b"abcdefgh"), "abcd... (8 bytes total)");
        assert_eq!(logger.render_body(b"abc"), "abc");
        assert_eq!(logger.render_body(b""), "");
    }

    #[test]
    fn test_render_body_scrubs_passwords() {
        let logger = NetworkLogger::new(1024);
        let rendered = logger.render_body(br#"{"user":"kim","password":"hunter2"}"#);
        assert!(!rendered.contains("hunter2"));
    }
}
