//! Errors returned by calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when issuing a call through an `ApiClient`
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure: connection, TLS, timeout
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status
        status: StatusCode,
        /// Response body as text
        body: String,
    },

    /// Response body did not decode into the expected type. Numeric fields
    /// holding non-numeric text end up here.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Path template references a placeholder no argument was bound to
    #[error("Path parameter '{0}' is not bound")]
    MissingPathParam(String),

    /// Path parameter value that would turn into a `.` or `..` segment
    #[error("Path parameter '{name}' cannot be '{value}'")]
    InvalidPathParam {
        /// Placeholder name
        name: String,
        /// Rejected value
        value: String,
    },

    /// Rendered path could not be joined onto the base URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Header name or value rejected by the transport
    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    /// Query value that has no flat string form (e.g. a JSON object)
    #[error("Invalid query parameter '{name}': {reason}")]
    InvalidQuery {
        /// Parameter name
        name: String,
        /// Why the value could not be flattened
        reason: String,
    },
}

impl ApiError {
    /// HTTP status of a non-success response, if that is what failed
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server answered with a non-success status
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Returns true if the response body did not decode
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let error = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: "missing".to_string(),
        };
        assert!(error.is_status());
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(error.to_string(), "HTTP 404 Not Found: missing");

        let error = ApiError::MissingPathParam("id".to_string());
        assert!(!error.is_status());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_from_serde_error_is_decode() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ApiError::Decode(serde_error);
        assert!(error.is_decode());
        assert!(error.to_string().starts_with("Failed to decode response body"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiError::MissingPathParam("id".to_string()).to_string(),
            "Path parameter 'id' is not bound"
        );
        assert_eq!(
            ApiError::InvalidPathParam {
                name: "id".to_string(),
                value: "..".to_string(),
            }
            .to_string(),
            "Path parameter 'id' cannot be '..'"
        );
        assert_eq!(
            ApiError::InvalidHeader("bad header".to_string()).to_string(),
            "Invalid header 'bad header'"
        );
        assert_eq!(
            ApiError::InvalidQuery {
                name: "filter".to_string(),
                reason: "objects cannot be flattened".to_string(),
            }
            .to_string(),
            "Invalid query parameter 'filter': objects cannot be flattened"
        );
    }
}
