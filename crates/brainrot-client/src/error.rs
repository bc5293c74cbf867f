//! Client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Backend unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            detail: detail.into(),
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Server-provided explanation, when the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Check if the backend could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        match self {
            ClientError::ServiceUnavailable(_) => true,
            ClientError::Network(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Message suitable for a banner: the server detail if any, otherwise
    /// the caller's fallback text.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
