//! Backend availability as shown on the upload screens.

use tracing::warn;

use brainrot_client::BackendApi;

const UNAVAILABLE_BANNER: &str =
    "Cannot reach the video generation service. Make sure the backend is running, then reload.";

/// Result of the last health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    /// Not checked yet
    #[default]
    Unknown,
    Healthy,
    Unavailable,
}

impl BackendStatus {
    /// Run the health check once. There is no automatic re-check.
    pub async fn check(api: &dyn BackendApi) -> Self {
        match api.health_check().await {
            Ok(true) => BackendStatus::Healthy,
            Ok(false) => BackendStatus::Unavailable,
            Err(e) => {
                warn!("Health check failed: {}", e);
                BackendStatus::Unavailable
            }
        }
    }

    /// Submission is disabled only after a failed check.
    pub fn can_submit(&self) -> bool {
        !matches!(self, BackendStatus::Unavailable)
    }

    /// Persistent banner text, if one should be shown.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            BackendStatus::Unavailable => Some(UNAVAILABLE_BANNER),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBackend;

    #[tokio::test]
    async fn test_check_reports_health() {
        let healthy = ScriptedBackend::new();
        assert_eq!(BackendStatus::check(&healthy).await, BackendStatus::Healthy);

        let down = ScriptedBackend::new().with_health(false);
        let status = BackendStatus::check(&down).await;
        assert_eq!(status, BackendStatus::Unavailable);
        assert!(!status.can_submit());
        assert!(status.banner().is_some());
    }

    #[test]
    fn test_unknown_allows_submission() {
        assert!(BackendStatus::Unknown.can_submit());
        assert_eq!(BackendStatus::Unknown.banner(), None);
    }
}
