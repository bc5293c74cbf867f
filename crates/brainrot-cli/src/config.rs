//! Application configuration.

use brainrot_client::ClientConfig;
use brainrot_flow::FlowConfig;

/// Everything the binary reads from the environment.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub flow: FlowConfig,
}

impl AppConfig {
    /// Create config from environment variables (after `.env` is loaded).
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            flow: FlowConfig::from_env(),
        }
    }
}
