//! Processing job models.
//!
//! A processing job is owned by the backend; the client only holds its opaque
//! handle and polls [`ProcessingStatus`] snapshots until one reports
//! completion.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Video;

/// Opaque handle of a backend processing job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ProcessingId(pub String);

impl ProcessingId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProcessingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Response of `POST /process-materials`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub processing_id: ProcessingId,
}

/// Snapshot of a processing job as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStatus {
    /// Job handle (echoed by the backend, not always present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_id: Option<ProcessingId>,

    /// Progress (0-100), expected but not guaranteed to be non-decreasing
    #[serde(default)]
    pub progress: u32,

    /// Human-readable phase label
    #[serde(default)]
    pub status: String,

    /// Terminal flag; once true `videos` is the final result set
    #[serde(default)]
    pub complete: bool,

    /// Generated videos, authoritative only when `complete` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Video>>,
}

impl ProcessingStatus {
    /// Progress clamped to 100.
    pub fn progress_percent(&self) -> u8 {
        self.progress.min(100) as u8
    }

    /// The final video list, or `None` while the job is still running.
    ///
    /// A completed job without a `videos` field yields an empty list.
    pub fn terminal_videos(&self) -> Option<Vec<Video>> {
        if self.complete {
            Some(self.videos.clone().unwrap_or_default())
        } else {
            None
        }
    }
}

/// Ordered phases of a processing job as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStage {
    AnalyzingMaterials,
    ExtractingConcepts,
    GeneratingContent,
    CreatingAudio,
    BuildingVideos,
    Finalizing,
}

/// Display state of one stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageState {
    /// Not reached yet
    Pending,
    /// Currently running, with progress inside the stage
    Active(StageProgress),
    /// Finished
    Done,
}

/// Progress inside an active stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageProgress {
    /// Percentage (0-100) of this stage's own span
    pub percent: f32,
    /// Item counter extracted from the status label, e.g. `Audio 2/5`
    pub detail: Option<String>,
}

impl ProcessingStage {
    pub const ALL: [ProcessingStage; 6] = [
        ProcessingStage::AnalyzingMaterials,
        ProcessingStage::ExtractingConcepts,
        ProcessingStage::GeneratingContent,
        ProcessingStage::CreatingAudio,
        ProcessingStage::BuildingVideos,
        ProcessingStage::Finalizing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProcessingStage::AnalyzingMaterials => "Analyzing your learning materials",
            ProcessingStage::ExtractingConcepts => "Extracting key concepts",
            ProcessingStage::GeneratingContent => "Generating educational content",
            ProcessingStage::CreatingAudio => "Creating audio narration",
            ProcessingStage::BuildingVideos => "Building videos with background visuals",
            ProcessingStage::Finalizing => "Finalizing your videos",
        }
    }

    /// Progress value at which the stage counts as done.
    pub fn done_at(&self) -> u8 {
        match self {
            ProcessingStage::AnalyzingMaterials => 10,
            ProcessingStage::ExtractingConcepts => 20,
            ProcessingStage::GeneratingContent => 30,
            ProcessingStage::CreatingAudio => 50,
            ProcessingStage::BuildingVideos => 95,
            ProcessingStage::Finalizing => 95,
        }
    }

    /// Span `[start, end)` during which the stage reports inner progress.
    fn active_span(&self) -> Option<(u8, u8)> {
        match self {
            ProcessingStage::CreatingAudio => Some((30, 50)),
            ProcessingStage::BuildingVideos => Some((50, 95)),
            _ => None,
        }
    }

    /// Label prefix the backend uses while this stage is running, and its
    /// short replacement.
    fn detail_prefix(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ProcessingStage::CreatingAudio => Some(("Creating audio narration", "Audio")),
            ProcessingStage::BuildingVideos => Some(("Creating video ", "Video ")),
            _ => None,
        }
    }

    /// State of every stage, in order, for one progress value and label.
    pub fn checklist(progress: u8, status_label: &str) -> Vec<(ProcessingStage, StageState)> {
        Self::ALL
            .iter()
            .map(|stage| (*stage, stage.state(progress, status_label)))
            .collect()
    }

    /// Derive the display state from overall progress and the status label.
    pub fn state(&self, progress: u8, status_label: &str) -> StageState {
        if progress >= self.done_at() {
            return StageState::Done;
        }

        match self.active_span() {
            Some((start, end)) if progress >= start && progress < end => {
                let span = f32::from(end - start);
                let percent = ((f32::from(progress - start) / span) * 100.0).min(100.0);
                let detail = self.detail_prefix().and_then(|(prefix, short)| {
                    status_label
                        .contains(prefix)
                        .then(|| status_label.replacen(prefix, short, 1).replacen(':', " -", 1))
                });
                StageState::Active(StageProgress { percent, detail })
            }
            _ => StageState::Pending,
        }
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
