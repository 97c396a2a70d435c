//! Fetch error types

use std::time::Duration;

/// Errors reported by a [`FetchGateway`](crate::gateway::FetchGateway).
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The data source rejected the request.
    #[error("Gateway error: {message}")]
    Gateway {
        /// Error message.
        message: String,
        /// Source-specific error code, if available.
        code: Option<String>,
    },

    /// The data source did not answer in time.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The data source answered with something that is not a page.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Creates a new gateway error.
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new gateway error with a source-specific code.
    pub fn gateway_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Creates a new invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Returns the source-specific error code if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Gateway { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if retrying the same request may succeed.
    ///
    /// The controller never retries on its own; this is for `on_error`
    /// handlers that want to offer a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        Self::gateway(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        Self::gateway(message)
    }
}
