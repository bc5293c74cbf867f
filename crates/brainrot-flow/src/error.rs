//! Flow error types.

use thiserror::Error;

use brainrot_client::ClientError;

use crate::player::PlayerAction;

pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Debug, Error)]
pub enum FlowError {
    /// Local validation failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    #[error("No videos available")]
    NoVideos,

    #[error("Key '{key}' is bound to both {first:?} and {second:?}")]
    ConflictingBinding {
        key: String,
        first: PlayerAction,
        second: PlayerAction,
    },

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

impl FlowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn submission_failed(msg: impl Into<String>) -> Self {
        Self::SubmissionFailed(msg.into())
    }

    /// Text for an inline message or banner.
    pub fn user_message(&self) -> String {
        match self {
            FlowError::Validation(msg)
            | FlowError::BackendUnavailable(msg)
            | FlowError::SubmissionFailed(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
