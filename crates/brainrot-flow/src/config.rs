//! Flow configuration.

use std::time::Duration;

use crate::player::PlayerConfig;
use crate::poller::PollerConfig;

/// Configuration for the whole upload → processing → viewing flow.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Processing status polling
    pub poller: PollerConfig,
    /// Short-form player behaviour
    pub player: PlayerConfig,
    /// Whether at least one learning material must be selected
    pub materials_required: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            poller: PollerConfig::default(),
            player: PlayerConfig::default(),
            materials_required: true,
        }
    }
}

impl FlowConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            poller: PollerConfig {
                interval: Duration::from_millis(
                    std::env::var("BRAINROT_POLL_INTERVAL_MS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(1500),
                ),
                max_attempts: match std::env::var("BRAINROT_POLL_MAX_ATTEMPTS") {
                    // 0 disables the attempt cap
                    Ok(s) => s.parse().ok().filter(|n| *n > 0),
                    Err(_) => defaults.poller.max_attempts,
                },
                timeout: std::env::var("BRAINROT_POLL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs),
            },
            player: PlayerConfig {
                swipe_threshold_px: std::env::var("BRAINROT_SWIPE_THRESHOLD_PX")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|px: &f64| px.is_finite() && *px >= 0.0)
                    .unwrap_or(defaults.player.swipe_threshold_px),
                auto_advance_delay: Duration::from_millis(
                    std::env::var("BRAINROT_AUTO_ADVANCE_MS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(1500),
                ),
                key_bindings: defaults.player.key_bindings,
            },
            materials_required: std::env::var("BRAINROT_MATERIALS_REQUIRED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }
}
