//! Backend seam used by the application core.

use async_trait::async_trait;

use brainrot_models::{MediaOrigin, ProcessingId, ProcessingStatus, Video};

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::types::MaterialsUpload;

/// Operations the client flows need from the backend.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `true` only when the backend reports itself healthy.
    async fn health_check(&self) -> ClientResult<bool>;

    /// Start a processing job for the uploaded files.
    async fn process_materials(&self, upload: &MaterialsUpload) -> ClientResult<ProcessingId>;

    /// Current status of a processing job.
    async fn processing_status(&self, id: &ProcessingId) -> ClientResult<ProcessingStatus>;

    /// Best-effort removal of earlier temporary artifacts.
    async fn cleanup(&self) -> ClientResult<()>;

    /// The backend's current video list.
    async fn list_videos(&self) -> ClientResult<Vec<Video>>;

    /// Origin against which video locators are resolved.
    fn media_origin(&self) -> MediaOrigin;
}

#[async_trait]
impl BackendApi for ApiClient {
    async fn health_check(&self) -> ClientResult<bool> {
        ApiClient::health_check(self).await
    }

    async fn process_materials(&self, upload: &MaterialsUpload) -> ClientResult<ProcessingId> {
        ApiClient::process_materials(self, upload).await
    }

    async fn processing_status(&self, id: &ProcessingId) -> ClientResult<ProcessingStatus> {
        ApiClient::processing_status(self, id).await
    }

    async fn cleanup(&self) -> ClientResult<()> {
        ApiClient::cleanup(self).await
    }

    async fn list_videos(&self) -> ClientResult<Vec<Video>> {
        ApiClient::list_videos(self).await
    }

    fn media_origin(&self) -> MediaOrigin {
        ApiClient::media_origin(self).clone()
    }
}
