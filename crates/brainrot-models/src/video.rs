//! Generated video models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a generated video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A short educational video produced by the backend.
///
/// Videos are immutable once received; the client only displays them and
/// hands them between screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique video ID
    pub id: VideoId,

    /// Display title
    pub title: String,

    /// Locator of the media stream (usually relative to the backend origin)
    pub url: String,

    /// Thumbnail locator or derived preview URL
    pub thumbnail: String,

    /// Declared duration in seconds
    pub duration: u32,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Video {
    /// Duration formatted as `M:SS`.
    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }

    /// Description text, empty when the backend sent none.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Format whole seconds as `M:SS`.
///
/// Minutes are not padded and may exceed 59.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a playback position as `M:SS`, flooring fractional seconds.
///
/// Negative and non-finite positions render as `0:00`.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return format_duration(0);
    }
    format_duration(seconds.floor() as u32)
}
