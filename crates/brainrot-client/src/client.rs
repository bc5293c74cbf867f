//! Backend HTTP client.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use brainrot_models::{
    CleanupResponse, HealthResponse, MediaOrigin, ProcessingId, ProcessingStatus, SubmitResponse,
    Video,
};

use crate::error::{ClientError, ClientResult};
use crate::types::MaterialsUpload;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API, including the `/api` prefix
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120), // uploads can be large
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("BRAINROT_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("BRAINROT_API_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }
}

/// Client for the backend API.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    media_origin: MediaOrigin,
}

impl ApiClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        let media_origin = MediaOrigin::from_url(&base_url)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url,
            media_origin,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Origin that serves generated media.
    pub fn media_origin(&self) -> &MediaOrigin {
        &self.media_origin
    }

    /// Check if the backend is healthy.
    ///
    /// Never fails: transport and decoding problems are logged and reported
    /// as unhealthy.
    pub async fn health_check(&self) -> ClientResult<bool> {
        let url = self.endpoint(&["health"])?;

        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<HealthResponse>().await {
                    Ok(health) => Ok(health.is_healthy()),
                    Err(e) => {
                        warn!("Backend health response unreadable: {}", e);
                        Ok(false)
                    }
                }
            }
            Ok(response) => {
                warn!("Backend health check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Backend health check error: {}", e);
                Ok(false)
            }
        }
    }

    /// Submit materials for processing and return the job handle.
    pub async fn process_materials(&self, upload: &MaterialsUpload) -> ClientResult<ProcessingId> {
        let url = self.endpoint(&["process-materials"])?;

        let mut form = Form::new();
        for (category, file) in upload.parts() {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.content_type)?;
            form = form.part(category.field_name(), part);
        }

        debug!(
            files = upload.file_count(),
            "Submitting materials to {}", url
        );

        let response = self.http.post(url).multipart(form).send().await?;
        let submitted: SubmitResponse =
            Self::read_json(response, "Failed to process files").await?;

        Ok(submitted.processing_id)
    }

    /// Fetch the current status of a processing job.
    pub async fn processing_status(&self, id: &ProcessingId) -> ClientResult<ProcessingStatus> {
        let url = self.endpoint(&["processing-status", id.as_str()])?;

        let response = self.http.get(url).send().await?;
        Self::read_json(response, "Failed to get processing status").await
    }

    /// Ask the backend to remove temporary artifacts of earlier runs.
    pub async fn cleanup(&self) -> ClientResult<()> {
        let url = self.endpoint(&["cleanup"])?;

        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let cleanup: CleanupResponse = Self::read_json(response, "Cleanup failed").await?;

        if cleanup.is_success() {
            Ok(())
        } else {
            Err(ClientError::invalid_response(format!(
                "cleanup reported status '{}'",
                cleanup.status
            )))
        }
    }

    /// Fetch the backend's current video list.
    pub async fn list_videos(&self) -> ClientResult<Vec<Video>> {
        let url = self.endpoint(&["videos"])?;

        let response = self.http.get(url).send().await?;
        Self::read_json(response, "Failed to fetch videos").await
    }

    /// Build `<base>/<segments...>`, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Decode a JSON body, turning non-success statuses into
    /// [`ClientError::Rejected`] with the server's `detail` when present.
    /// Gateway errors (502-504) become [`ClientError::ServiceUnavailable`].
    async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> ClientResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if matches!(status.as_u16(), 502..=504) {
            warn!("Backend gateway error: {}", status);
            return Err(ClientError::ServiceUnavailable(status.to_string()));
        }
        if !status.is_success() {
            let detail = extract_detail(&body).unwrap_or_else(|| fallback.to_string());
            return Err(ClientError::rejected(status.as_u16(), detail));
        }

        serde_json::from_str(&body).map_err(ClientError::Json)
    }
}

/// FastAPI-style error bodies carry `{"detail": "..."}`.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        let url = client.endpoint(&["processing-status", "job 42/a"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/processing-status/job%2042%2Fa"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = ApiClient::new(ClientConfig {
            base_url: "http://backend:9000/api/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint(&["health"]).unwrap().as_str(),
            "http://backend:9000/api/health"
        );
        assert_eq!(client.media_origin().as_str(), "http://backend:9000");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new(ClientConfig {
            base_url: "localhost".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail":"No files"}"#).as_deref(),
            Some("No files")
        );
        assert_eq!(extract_detail(r#"{"detail":[{"loc":["body"]}]}"#), None);
        assert_eq!(extract_detail("Internal Server Error"), None);
    }
}
