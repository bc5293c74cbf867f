//! Shared data models for the Brainrot learning-video client.
//!
//! This crate provides Serde-serializable types for:
//! - Generated videos and their display formatting
//! - Processing jobs, status snapshots and the stage checklist
//! - Backend health and cleanup responses
//! - User-selected material files
//! - Resolving media locators against the backend origin

pub mod health;
pub mod media;
pub mod processing;
pub mod upload;
pub mod video;

// Re-export common types
pub use health::{CleanupResponse, HealthResponse};
pub use media::{MediaOrigin, MediaOriginError};
pub use processing::{
    ProcessingId, ProcessingStage, ProcessingStatus, StageProgress, StageState, SubmitResponse,
};
pub use upload::{format_megabytes, FileCategory, MaterialFile};
pub use video::{format_duration, format_timestamp, Video, VideoId};
