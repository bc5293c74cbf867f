//! Scripted backend and clocks for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use brainrot_client::{BackendApi, ClientError, ClientResult, MaterialsUpload};
use brainrot_models::{MediaOrigin, ProcessingId, ProcessingStatus, Video, VideoId};

use crate::clock::Clock;
use crate::store::SessionStore;

pub fn video(id: &str) -> Video {
    Video {
        id: VideoId::from(id),
        title: format!("Concept {id}"),
        url: format!("/videos/{id}.mp4"),
        thumbnail: format!("https://picsum.photos/seed/{id}/400/225"),
        duration: 60,
        description: Some(format!("About {id}")),
    }
}

pub fn videos(ids: &[&str]) -> Vec<Video> {
    ids.iter().map(|id| video(id)).collect()
}

pub fn in_progress(progress: u32, label: &str) -> ProcessingStatus {
    ProcessingStatus {
        processing_id: None,
        progress,
        status: label.to_string(),
        complete: false,
        videos: None,
    }
}

pub fn completed(videos: Vec<Video>) -> ProcessingStatus {
    ProcessingStatus {
        processing_id: None,
        progress: 100,
        status: "Done".to_string(),
        complete: true,
        videos: Some(videos),
    }
}

/// One scripted reply to a status query.
pub enum StatusReply {
    Status(ProcessingStatus),
    Fail(&'static str),
}

/// Backend whose replies are fixed up front; counts every call.
pub struct ScriptedBackend {
    healthy: bool,
    submit: Mutex<Option<Result<ProcessingId, (u16, &'static str)>>>,
    statuses: Mutex<VecDeque<StatusReply>>,
    repeat_status: Option<ProcessingStatus>,
    cleanup_ok: bool,
    listed: Option<Vec<Video>>,
    replace_flow_on_submit: Option<SessionStore>,
    pub submitted: Mutex<Vec<MaterialsUpload>>,
    pub health_calls: AtomicU32,
    pub submit_calls: AtomicU32,
    pub status_calls: AtomicU32,
    pub cleanup_calls: AtomicU32,
    pub list_calls: AtomicU32,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            healthy: true,
            submit: Mutex::new(None),
            statuses: Mutex::new(VecDeque::new()),
            repeat_status: None,
            cleanup_ok: true,
            listed: Some(Vec::new()),
            replace_flow_on_submit: None,
            submitted: Mutex::new(Vec::new()),
            health_calls: AtomicU32::new(0),
            submit_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            cleanup_calls: AtomicU32::new(0),
            list_calls: AtomicU32::new(0),
        }
    }

    pub fn with_health(mut self, healthy: bool) -> Self {
        self.healthy = healthy;
        self
    }

    pub fn with_submit(self, id: &str) -> Self {
        *self.submit.lock().unwrap() = Some(Ok(ProcessingId::from(id)));
        self
    }

    pub fn with_submit_error(self, status: u16, detail: &'static str) -> Self {
        *self.submit.lock().unwrap() = Some(Err((status, detail)));
        self
    }

    pub fn with_statuses(self, replies: Vec<StatusReply>) -> Self {
        *self.statuses.lock().unwrap() = replies.into();
        self
    }

    /// Reply used once the scripted statuses run out.
    pub fn repeating(mut self, status: ProcessingStatus) -> Self {
        self.repeat_status = Some(status);
        self
    }

    /// Start a new flow in `store` while the submit request is in flight.
    pub fn replacing_flow_on_submit(mut self, store: SessionStore) -> Self {
        self.replace_flow_on_submit = Some(store);
        self
    }

    pub fn with_cleanup_failure(mut self) -> Self {
        self.cleanup_ok = false;
        self
    }

    pub fn with_videos(mut self, videos: Vec<Video>) -> Self {
        self.listed = Some(videos);
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.listed = None;
        self
    }

    pub fn count(counter: &AtomicU32) -> u32 {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendApi for ScriptedBackend {
    async fn health_check(&self) -> ClientResult<bool> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.healthy)
    }

    async fn process_materials(&self, upload: &MaterialsUpload) -> ClientResult<ProcessingId> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(upload.clone());
        if let Some(store) = &self.replace_flow_on_submit {
            store.begin_flow().await;
        }
        match self.submit.lock().unwrap().clone() {
            Some(Ok(id)) => Ok(id),
            Some(Err((status, detail))) => Err(ClientError::rejected(status, detail)),
            None => Err(ClientError::ServiceUnavailable("no submit scripted".into())),
        }
    }

    async fn processing_status(&self, _id: &ProcessingId) -> ClientResult<ProcessingStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        match next {
            Some(StatusReply::Status(status)) => Ok(status),
            Some(StatusReply::Fail(msg)) => Err(ClientError::ServiceUnavailable(msg.to_string())),
            None => self
                .repeat_status
                .clone()
                .ok_or_else(|| ClientError::invalid_response("status script exhausted")),
        }
    }

    async fn cleanup(&self) -> ClientResult<()> {
        self.cleanup_calls.fetch_add(1, Ordering::SeqCst);
        if self.cleanup_ok {
            Ok(())
        } else {
            Err(ClientError::rejected(500, "cleanup exploded"))
        }
    }

    async fn list_videos(&self) -> ClientResult<Vec<Video>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.listed
            .clone()
            .ok_or_else(|| ClientError::ServiceUnavailable("connection refused".into()))
    }

    fn media_origin(&self) -> MediaOrigin {
        MediaOrigin::default()
    }
}

/// Virtual clock: `sleep` returns at once and advances `now`.
pub struct ManualClock {
    start: Instant,
    elapsed: Mutex<Duration>,
    pub sleeps: AtomicU32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Clock for ManualClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        *self.elapsed.lock().unwrap() += duration;
        tokio::task::yield_now().await;
    }

    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock().unwrap()
    }
}
