//! Backend health and cleanup responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthResponse {
    /// Only the literal `healthy` counts as success.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Response of `POST /cleanup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CleanupResponse {
    pub status: String,
}

impl CleanupResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
