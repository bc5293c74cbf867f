//! Time source for timers.
//!
//! The poller sleeps and measures elapsed time through [`Clock`] so tests can
//! substitute a virtual clock instead of waiting in real time.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

#[async_trait]
pub trait Clock: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);

    /// Current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by the tokio timer (honours `tokio::time::pause`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}
