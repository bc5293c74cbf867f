//! Session store handing state between screens.
//!
//! One [`FlowSession`] exists per upload flow. Starting a new flow discards
//! the previous one, and writes addressed to a flow that is no longer
//! current are refused so a late poller cannot leak results into a newer
//! flow. Nothing is persisted: the store lives as long as the process.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use brainrot_models::{MaterialFile, ProcessingId, Video};

/// Identifier of one upload flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(Uuid);

impl FlowId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State held for the current flow.
#[derive(Debug, Clone)]
pub struct FlowSession {
    pub id: FlowId,
    pub started_at: DateTime<Utc>,
    /// Job handle returned by the backend on submit
    pub processing_id: Option<ProcessingId>,
    /// Final result set of the job (or of the fallback fetch)
    pub generated_videos: Option<Vec<Video>>,
    /// Assignment selected on the first upload step
    pub assignment_files: Vec<MaterialFile>,
}

impl FlowSession {
    fn new() -> Self {
        Self {
            id: FlowId::new(),
            started_at: Utc::now(),
            processing_id: None,
            generated_videos: None,
            assignment_files: Vec::new(),
        }
    }
}

/// Shared handle to the session state. Cloning is cheap.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<FlowSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new flow, discarding everything held for the previous one.
    pub async fn begin_flow(&self) -> FlowId {
        let session = FlowSession::new();
        let id = session.id;
        let previous = self.inner.write().await.replace(session);
        if let Some(previous) = previous {
            debug!(previous = %previous.id, flow = %id, "Replaced upload flow");
        } else {
            debug!(flow = %id, "Started upload flow");
        }
        id
    }

    /// Id of the current flow, if any.
    pub async fn current_flow(&self) -> Option<FlowId> {
        self.inner.read().await.as_ref().map(|s| s.id)
    }

    /// Copy of the current session.
    pub async fn snapshot(&self) -> Option<FlowSession> {
        self.inner.read().await.clone()
    }

    pub async fn processing_id(&self) -> Option<ProcessingId> {
        self.inner
            .read()
            .await
            .as_ref()
            .and_then(|s| s.processing_id.clone())
    }

    pub async fn set_processing_id(&self, flow: FlowId, id: ProcessingId) -> bool {
        self.update(flow, "processing_id", |s| s.processing_id = Some(id))
            .await
    }

    pub async fn generated_videos(&self) -> Option<Vec<Video>> {
        self.inner
            .read()
            .await
            .as_ref()
            .and_then(|s| s.generated_videos.clone())
    }

    /// Record the final result set of `flow`'s job.
    pub async fn store_videos(&self, flow: FlowId, videos: Vec<Video>) -> bool {
        self.update(flow, "generated_videos", |s| s.generated_videos = Some(videos))
            .await
    }

    /// Keep videos obtained from the fallback list endpoint, starting a
    /// session when none exists.
    pub async fn cache_videos(&self, videos: Vec<Video>) {
        let mut guard = self.inner.write().await;
        guard
            .get_or_insert_with(FlowSession::new)
            .generated_videos = Some(videos);
    }

    pub async fn assignment_files(&self) -> Vec<MaterialFile> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.assignment_files.clone())
            .unwrap_or_default()
    }

    pub async fn set_assignment_files(&self, flow: FlowId, files: Vec<MaterialFile>) -> bool {
        self.update(flow, "assignment_files", |s| s.assignment_files = files)
            .await
    }

    /// Drop all session state.
    pub async fn clear(&self) {
        self.inner.write().await.take();
    }

    async fn update(&self, flow: FlowId, field: &str, apply: impl FnOnce(&mut FlowSession)) -> bool {
        let mut guard = self.inner.write().await;
        match guard.as_mut() {
            Some(session) if session.id == flow => {
                apply(session);
                true
            }
            Some(session) => {
                warn!(
                    flow = %flow,
                    current = %session.id,
                    "Ignoring {} write for a flow that is no longer current", field
                );
                false
            }
            None => {
                warn!(flow = %flow, "Ignoring {} write: no active flow", field);
                false
            }
        }
    }
}
