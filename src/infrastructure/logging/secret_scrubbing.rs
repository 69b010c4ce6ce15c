//! Credential redaction for logged traffic.

use regex::{Captures, Regex};
use reqwest::header::HeaderName;
use std::fmt;
use std::sync::LazyLock;

static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(Bearer|Basic)\s+[a-zA-Z0-9\-_\.=+/]+").expect("bearer pattern is valid")
});

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)["']?(api_?key|access_?token|refresh_?token|token|secret|client_secret)["']?\s*[:=]\s*["']?[^"'\s,&}]+["']?"#,
    )
    .expect("token pattern is valid")
});

static PASSWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["']?(password|passwd)["']?\s*[:=]\s*["']?[^"'\s,&}]+["']?"#)
        .expect("password pattern is valid")
});

/// Headers whose values are never written to logs.
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Redacts credentials from header values and bodies before they are logged.
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    /// Create a scrubber
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a free-form message (URL, body, header value) of secrets
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = BEARER_PATTERN.replace_all(message, "$1 [TOKEN_REDACTED]");
        let scrubbed = TOKEN_PATTERN.replace_all(&scrubbed, |caps: &Captures| {
            format!("{}=[REDACTED]", &caps[1])
        });
        PASSWORD_PATTERN
            .replace_all(&scrubbed, |caps: &Captures| format!("{}=[REDACTED]", &caps[1]))
            .into_owned()
    }

    /// Scrub one header value; sensitive headers are redacted outright.
    pub fn scrub_header(&self, name: &HeaderName, value: &str) -> String {
        if Self::is_sensitive_header(name) {
            "[REDACTED]".to_string()
        } else {
            self.scrub_message(value)
        }
    }

    /// Whether `name` is always redacted
    pub fn is_sensitive_header(name: &HeaderName) -> bool {
        SENSITIVE_HEADERS.contains(&name.as_str())
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
