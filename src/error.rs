//! Error types for the SDK.

use thiserror::Error;

/// SDK error type.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Realtime watch stream failed.
    #[error("Stream error: {0}")]
    #[cfg(feature = "realtime")]
    Stream(String),
}

impl Error {
    /// HTTP status code of the failed response, if the error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error is an authentication failure (401/403).
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether this error is a not-found response.
    ///
    /// List and lookup operations map absence to `vec![]` / `None` instead of
    /// returning this; a surfaced 404 means the caller hit an endpoint that
    /// treats absence as an error (e.g. a write against a deleted resource).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status() {
        let err = Error::Api {
            status: 404,
            message: "no such agent".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_auth_classification() {
        for status in [401, 403] {
            let err = Error::Api {
                status,
                message: "denied".to_string(),
            };
            assert!(err.is_auth_error());
            assert!(!err.is_not_found());
        }
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = Error::Config("missing base URL".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_auth_error());
    }
}
