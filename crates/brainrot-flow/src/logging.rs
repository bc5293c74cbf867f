//! Structured logging for processing jobs.
//!
//! Keeps log lines for one job consistent so they can be filtered by
//! `processing_id` regardless of which screen emitted them.

use tracing::{error, info, warn};

use brainrot_models::ProcessingId;

/// Logger bound to one processing job and operation.
#[derive(Debug, Clone)]
pub struct FlowLogger {
    processing_id: String,
    operation: String,
}

impl FlowLogger {
    /// Create a new logger for a job and operation (e.g. `"status_poll"`).
    pub fn new(processing_id: &ProcessingId, operation: &str) -> Self {
        Self {
            processing_id: processing_id.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            processing_id = %self.processing_id,
            operation = %self.operation,
            "Job started: {}", message
        );
    }

    pub fn log_progress(&self, progress: u8, status: &str) {
        info!(
            processing_id = %self.processing_id,
            operation = %self.operation,
            progress,
            "Job progress: {}", status
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            processing_id = %self.processing_id,
            operation = %self.operation,
            "Job warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            processing_id = %self.processing_id,
            operation = %self.operation,
            "Job error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            processing_id = %self.processing_id,
            operation = %self.operation,
            "Job completed: {}", message
        );
    }
}
