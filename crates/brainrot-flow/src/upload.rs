//! Upload coordination for the assignment and materials screens.

use tracing::{info, warn};

use brainrot_client::{BackendApi, MaterialsUpload};
use brainrot_models::MaterialFile;

use crate::backend_status::BackendStatus;
use crate::error::{FlowError, FlowResult};
use crate::logging::FlowLogger;
use crate::screen::Screen;
use crate::selection::{AddReport, FileSelection, SelectionPolicy};
use crate::store::{FlowId, SessionStore};

const SUBMIT_FAILED: &str = "Failed to upload materials. Please try again.";

/// How an upload screen was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEntry {
    /// A new flow starts here; earlier state and artifacts are discarded
    Fresh,
    /// Continuing the current flow (e.g. materials after the assignment step)
    Continue,
}

/// State behind the upload screens.
#[derive(Debug)]
pub struct UploadCoordinator {
    assignment: FileSelection,
    materials: FileSelection,
    flow: Option<FlowId>,
    backend: BackendStatus,
    error: Option<String>,
    submitting: bool,
}

impl UploadCoordinator {
    pub fn new(materials_required: bool) -> Self {
        Self {
            assignment: FileSelection::new(SelectionPolicy::assignment()),
            materials: FileSelection::new(SelectionPolicy::materials(materials_required)),
            flow: None,
            backend: BackendStatus::Unknown,
            error: None,
            submitting: false,
        }
    }

    /// Prepare the screen when it is shown.
    ///
    /// A fresh entry starts a new flow and asks the backend to clean up
    /// earlier artifacts; cleanup failure is only logged. The health check
    /// runs in both cases.
    pub async fn prepare(&mut self, api: &dyn BackendApi, store: &SessionStore, entry: FlowEntry) {
        let flow = match (entry, store.current_flow().await) {
            (FlowEntry::Continue, Some(flow)) => flow,
            _ => {
                let flow = store.begin_flow().await;
                if let Err(e) = api.cleanup().await {
                    warn!(flow = %flow, "Cleanup before upload failed: {}", e);
                }
                flow
            }
        };
        self.flow = Some(flow);
        self.refresh_backend(api).await;
    }

    /// Re-run the health check on demand.
    pub async fn refresh_backend(&mut self, api: &dyn BackendApi) -> BackendStatus {
        self.backend = BackendStatus::check(api).await;
        self.backend
    }

    pub fn backend_status(&self) -> BackendStatus {
        self.backend
    }

    pub fn flow(&self) -> Option<FlowId> {
        self.flow
    }

    pub fn assignment(&self) -> &FileSelection {
        &self.assignment
    }

    pub fn materials(&self) -> &FileSelection {
        &self.materials
    }

    /// Inline error or failure banner currently shown.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn add_assignment(&mut self, files: Vec<MaterialFile>) -> AddReport {
        self.error = None;
        self.assignment.add(files)
    }

    pub fn add_materials(&mut self, files: Vec<MaterialFile>) -> AddReport {
        self.error = None;
        self.materials.add(files)
    }

    pub fn remove_assignment(&mut self, index: usize) -> Option<MaterialFile> {
        self.assignment.remove(index)
    }

    pub fn remove_material(&mut self, index: usize) -> Option<MaterialFile> {
        self.materials.remove(index)
    }

    /// Submit button text for the materials screen.
    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Processing..."
        } else if self.materials.is_empty() {
            "Skip & Generate Video"
        } else {
            "Generate My Video"
        }
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.backend.can_submit()
    }

    /// Keep the chosen assignment for the materials step.
    pub async fn submit_assignment(&mut self, store: &SessionStore) -> FlowResult<Screen> {
        if let Some(msg) = self.assignment.validate() {
            self.error = Some(msg.to_string());
            return Err(FlowError::validation(msg));
        }

        let flow = self.ensure_flow(store).await;
        store
            .set_assignment_files(flow, self.assignment.files().to_vec())
            .await;
        self.error = None;
        Ok(Screen::UploadMaterials)
    }

    /// Send the selected materials and start processing.
    ///
    /// Validation and backend availability are checked before any request.
    /// On failure the user stays on the screen with a banner.
    pub async fn submit(&mut self, api: &dyn BackendApi, store: &SessionStore) -> FlowResult<Screen> {
        if let Some(msg) = self.materials.validate() {
            self.error = Some(msg.to_string());
            return Err(FlowError::validation(msg));
        }
        if let Some(banner) = self.backend.banner() {
            self.error = Some(banner.to_string());
            return Err(FlowError::BackendUnavailable(banner.to_string()));
        }

        let flow = self.ensure_flow(store).await;
        let upload = MaterialsUpload::new(self.materials.files().to_vec())
            .with_assignments(store.assignment_files().await);

        self.submitting = true;
        self.error = None;
        info!(flow = %flow, files = upload.file_count(), "Submitting materials");
        let result = api.process_materials(&upload).await;
        self.submitting = false;

        let processing_id = match result {
            Ok(id) => id,
            Err(e) => {
                warn!(flow = %flow, "Material submission failed: {}", e);
                if e.is_unavailable() {
                    self.backend = BackendStatus::Unavailable;
                }
                let message = e.user_message(SUBMIT_FAILED);
                self.error = Some(message.clone());
                return Err(FlowError::submission_failed(message));
            }
        };

        let logger = FlowLogger::new(&processing_id, "submit");
        logger.log_start("materials accepted");
        if !store.set_processing_id(flow, processing_id).await {
            logger.log_warning("flow was replaced before the job could be recorded; job is orphaned");
            self.error = Some(SUBMIT_FAILED.to_string());
            return Err(FlowError::submission_failed(SUBMIT_FAILED));
        }
        Ok(Screen::Processing)
    }

    async fn ensure_flow(&mut self, store: &SessionStore) -> FlowId {
        let flow = match (self.flow, store.current_flow().await) {
            (Some(ours), Some(current)) if ours == current => ours,
            (None, Some(current)) => current,
            _ => store.begin_flow().await,
        };
        self.flow = Some(flow);
        flow
    }
}
