//! Errors raised by the upstream article search capability.
//!
//! Every failure the provider can produce collapses into [`SearchError`].
//! The pipeline treats all variants the same way (log, then degrade to an
//! empty list); the variants exist so the logs say what actually went wrong.

use thiserror::Error;

/// Failure talking to the article search provider.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Connection, TLS or protocol failure below HTTP.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx response without a recognisable provider error envelope.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered with `status: "error"`.
    #[error("provider error {code} (HTTP {status}): {message}")]
    Provider {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body was not the expected JSON envelope.
    #[error("could not decode provider response: {0}")]
    Decode(String),
}

impl SearchError {
    /// True when the provider refused the call because the quota is spent.
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            SearchError::Status { status, .. } => *status == 429,
            SearchError::Provider { status, code, .. } => {
                *status == 429 || code == "rateLimited" || code == "maximumResultsReached"
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_detection_by_status() {
        let err = SearchError::Status {
            status: 429,
            body: String::new(),
        };
        assert!(err.is_quota_exhausted());
    }

    #[test]
    fn test_quota_detection_by_provider_code() {
        let err = SearchError::Provider {
            status: 426,
            code: "maximumResultsReached".to_string(),
            message: "too many".to_string(),
        };
        assert!(err.is_quota_exhausted());

        let err = SearchError::Provider {
            status: 401,
            code: "apiKeyInvalid".to_string(),
            message: "bad key".to_string(),
        };
        assert!(!err.is_quota_exhausted());
    }

    #[test]
    fn test_display_includes_context() {
        let err = SearchError::Provider {
            status: 401,
            code: "apiKeyMissing".to_string(),
            message: "Your API key is missing.".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("apiKeyMissing"));
        assert!(rendered.contains("401"));
    }
}
