//! Error types for the data access layer.
//!
//! Two layers: [`FetchError`] describes transport failures from the browser
//! fetch API; [`SourceError`] is what the file sources hand to callers after
//! classification. A `NotFound` stays internal when a fallback can absorb
//! it; everything else reaches the UI as a display string.

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (timeout, CORS, etc.)
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

impl FetchError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(status) => Some(*status),
            _ => None,
        }
    }
}

/// Errors surfaced by the file sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Transport failed before a response arrived
    #[error("Network error: {0}")]
    Network(String),
    /// Server answered with a non-2xx status
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Requested path does not exist on the source
    #[error("Not found: {0}")]
    NotFound(String),
    /// Source refused to serve the path
    #[error("Access denied: {0}")]
    AccessDenied(String),
    /// Response arrived but could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
    /// Source is missing required configuration
    #[error("Source not configured: {0}")]
    NotInitialized(&'static str),
}

impl From<FetchError> for SourceError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(status) => Self::Http(status),
            FetchError::JsonParse(msg) => Self::Parse(msg),
            FetchError::Timeout => Self::Timeout,
            other => Self::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_classify_into_source_errors() {
        assert_eq!(SourceError::from(FetchError::Http(500)), SourceError::Http(500));
        assert_eq!(SourceError::from(FetchError::Timeout), SourceError::Timeout);
        assert!(matches!(
            SourceError::from(FetchError::JsonParse("bad token".into())),
            SourceError::Parse(_)
        ));
        assert!(matches!(
            SourceError::from(FetchError::NoWindow),
            SourceError::Network(_)
        ));
    }

    #[test]
    fn status_accessor_only_matches_http() {
        assert_eq!(FetchError::Http(404).status(), Some(404));
        assert_eq!(FetchError::Timeout.status(), None);
    }

    #[test]
    fn display_strings_are_presentable() {
        assert_eq!(SourceError::Http(404).to_string(), "HTTP error: 404");
        assert_eq!(
            SourceError::NotFound("docs/missing".into()).to_string(),
            "Not found: docs/missing"
        );
        assert_eq!(
            SourceError::AccessDenied("secret.txt: HTTP 403".into()).to_string(),
            "Access denied: secret.txt: HTTP 403"
        );
    }
}
