//! Processing status poller.
//!
//! Runs as a tokio task that queries the backend once per interval, with at
//! most one query in flight. State is published through a watch channel; the
//! task stops on completion, on the first query error, when the stall guard
//! trips, or when the handle is cancelled or dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use brainrot_client::BackendApi;
use brainrot_models::{ProcessingId, Video};

use crate::clock::{Clock, TokioClock};
use crate::logging::FlowLogger;
use crate::screen::Screen;
use crate::store::{FlowId, SessionStore};

pub const POLL_FAILED_MESSAGE: &str = "Failed to get processing updates. Please try again.";

/// Poller timing and stall guard.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay before each status query
    pub interval: Duration,
    /// Give up after this many queries without completion
    pub max_attempts: Option<u32>,
    /// Give up once this much time has passed since polling started
    pub timeout: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1500),
            max_attempts: Some(400),
            timeout: None,
        }
    }
}

/// What the processing screen is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// No job to poll
    Idle,
    Polling {
        /// Queries answered so far
        attempt: u32,
        progress: u8,
        status: String,
    },
    Complete {
        videos: Vec<Video>,
        /// Label of the final status report
        status: String,
    },
    Failed { message: String },
    /// The stall guard tripped before the job completed
    Stalled { attempts: u32 },
    Cancelled,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Polling { .. })
    }

    /// Screen to move to automatically, if any.
    pub fn next_screen(&self) -> Option<Screen> {
        match self {
            PollState::Complete { .. } => Some(Screen::Results),
            PollState::Idle => Some(Screen::upload_entry()),
            _ => None,
        }
    }

    /// Target of the "try again" action.
    pub fn retry_target(&self) -> Option<Screen> {
        match self {
            PollState::Failed { .. } | PollState::Stalled { .. } => Some(Screen::upload_entry()),
            _ => None,
        }
    }
}

/// Builder for a polling task.
pub struct ProcessingPoller {
    api: Arc<dyn BackendApi>,
    store: SessionStore,
    config: PollerConfig,
    clock: Arc<dyn Clock>,
}

impl ProcessingPoller {
    pub fn new(api: Arc<dyn BackendApi>, store: SessionStore, config: PollerConfig) -> Self {
        Self {
            api,
            store,
            config,
            clock: Arc::new(TokioClock),
        }
    }

    /// Use a different time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Start polling the job recorded in the current flow.
    ///
    /// Without a processing id nothing is spawned and the handle reports
    /// [`PollState::Idle`].
    pub async fn start(self) -> PollerHandle {
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let job = self
            .store
            .snapshot()
            .await
            .and_then(|s| s.processing_id.map(|id| (s.id, s.started_at, id)));

        let Some((flow, flow_started, id)) = job else {
            debug!("No processing id in session, nothing to poll");
            let (_, state_rx) = watch::channel(PollState::Idle);
            return PollerHandle {
                state: state_rx,
                cancel: cancel_tx,
                task: None,
            };
        };

        let (state_tx, state_rx) = watch::channel(PollState::Polling {
            attempt: 0,
            progress: 0,
            status: String::new(),
        });
        let task = tokio::spawn(self.run(flow, flow_started, id, state_tx, cancel_rx));

        PollerHandle {
            state: state_rx,
            cancel: cancel_tx,
            task: Some(task),
        }
    }

    async fn run(
        self,
        flow: FlowId,
        flow_started: DateTime<Utc>,
        id: ProcessingId,
        state_tx: watch::Sender<PollState>,
        mut cancel_rx: watch::Receiver<bool>,
    ) {
        let logger = FlowLogger::new(&id, "status_poll");
        logger.log_start("polling processing status");

        let started = self.clock.now();
        let mut attempt = 0u32;

        let final_state = loop {
            tokio::select! {
                biased;
                _ = cancelled(&mut cancel_rx) => break PollState::Cancelled,
                _ = self.clock.sleep(self.config.interval) => {}
            }

            if self.stalled(attempt, started) {
                logger.log_warning(&format!("no completion after {} queries", attempt));
                break PollState::Stalled { attempts: attempt };
            }

            let result = tokio::select! {
                biased;
                _ = cancelled(&mut cancel_rx) => break PollState::Cancelled,
                result = self.api.processing_status(&id) => result,
            };
            attempt += 1;

            match result {
                Ok(status) => match status.terminal_videos() {
                    Some(videos) => {
                        if self.store.store_videos(flow, videos.clone()).await {
                            logger.log_completion(&format!("{} videos ready", videos.len()));
                            debug!(
                                processing_id = %id,
                                flow_age_secs = (Utc::now() - flow_started).num_seconds(),
                                "Upload flow finished"
                            );
                            break PollState::Complete {
                                videos,
                                status: status.status,
                            };
                        }
                        logger.log_warning("flow was replaced before completion");
                        break PollState::Cancelled;
                    }
                    None => {
                        let progress = status.progress_percent();
                        logger.log_progress(progress, &status.status);
                        state_tx.send_replace(PollState::Polling {
                            attempt,
                            progress,
                            status: status.status,
                        });
                        if self.stalled(attempt, started) {
                            logger.log_warning(&format!("no completion after {} queries", attempt));
                            break PollState::Stalled { attempts: attempt };
                        }
                    }
                },
                Err(e) => {
                    logger.log_error(&format!("status query failed: {}", e));
                    break PollState::Failed {
                        message: POLL_FAILED_MESSAGE.to_string(),
                    };
                }
            }
        };

        if final_state == PollState::Cancelled {
            debug!(processing_id = %id, "Polling stopped");
        }
        state_tx.send_replace(final_state);
    }

    fn stalled(&self, attempts: u32, started: tokio::time::Instant) -> bool {
        let over_attempts = self
            .config
            .max_attempts
            .map_or(false, |max| attempts >= max);
        let over_time = self
            .config
            .timeout
            .map_or(false, |limit| self.clock.now().duration_since(started) >= limit);
        over_attempts || over_time
    }
}

/// Resolves once cancellation is requested or the handle is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Handle to a running poller. Dropping it cancels the task.
pub struct PollerHandle {
    state: watch::Receiver<PollState>,
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Latest published state.
    pub fn state(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// Receiver for following state changes.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// Stop polling; no further queries are issued.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Wait for the task to finish and return its final state.
    pub async fn wait(mut self) -> PollState {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Poller task ended abnormally: {}", e);
            }
        }
        self.state()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.cancel.send(true);
    }
}
