use thiserror::Error;

use crate::client::transport::BoxError;

/// Error returned by every data-access call.
///
/// Nothing is recovered locally: the request helper logs the failure and hands
/// it straight back to the caller, which decides how to present it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to fetch {endpoint}: {status_text}")]
    Http {
        endpoint: String,
        url: String,
        status: u16,
        /// Canonical reason phrase for `status`, not the server's own wording.
        status_text: String,
    },

    #[error("Failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP client setup failed: {0}")]
    Setup(#[from] reqwest::Error),
}

/// Coarse failure category, for callers that branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Http,
    Parse,
    InvalidRequest,
    Setup,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::Parse { .. } => ErrorKind::Parse,
            ApiError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ApiError::Setup(_) => ErrorKind::Setup,
        }
    }

    /// HTTP status code, for `Http` errors only.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
