//! Unified SDK error types.

use thiserror::Error;

/// Top-level client error.
#[derive(Error, Debug)]
pub enum DpdError {
    /// Caller-supplied arguments failed validation before any network call.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Transport, status, or decode failure from the HTTP layer.
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Result type alias for client operations.
pub type DpdResult<T> = Result<T, DpdError>;

impl DpdError {
    /// HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DpdError::Http(e) => e.status_code(),
            DpdError::InvalidParameter(_) => None,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Network-level failure from reqwest (connect, timeout, protocol).
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response from the API.
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: u16,
        body: String,
        url: String,
    },

    /// 2xx response whose body is not the expected JSON shape.
    #[error("failed to decode response from {url}: {detail} (body: {snippet})")]
    Decode {
        url: String,
        detail: String,
        snippet: String,
    },
}

/// Longest raw-body excerpt carried inside a [`HttpError::Decode`].
const SNIPPET_MAX: usize = 160;

impl HttpError {
    /// Build a [`HttpError::Decode`] with a bounded excerpt of the raw body.
    pub(crate) fn decode(url: &str, detail: &str, body: &str) -> Self {
        let snippet = match body.char_indices().nth(SNIPPET_MAX) {
            Some((idx, _)) => format!("{}…", &body[..idx]),
            None => body.to_string(),
        };
        HttpError::Decode {
            url: url.to_string(),
            detail: detail.to_string(),
            snippet,
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            #[cfg(feature = "http")]
            HttpError::Transport(e) => e.status().map(|s| s.as_u16()),
            HttpError::Decode { .. } => None,
        }
    }

    /// Whether this failure class is eligible for automatic re-attempt.
    ///
    /// Retryable: transport-level failures, HTTP 429, and any 5xx.
    /// Everything else (other 4xx, decode failures) surfaces immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            HttpError::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            HttpError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            HttpError::Decode { .. } => false,
        }
    }
}
