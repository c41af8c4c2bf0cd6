//! In-memory provider with a scripted status sequence, for orchestrator tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{PipelineError, Result};
use crate::script::{Script, ScriptStyle};
use crate::video::provider::VideoProvider;
use crate::video::types::{ProviderKind, RenderJob};

pub fn sample_script() -> Script {
    Script {
        content: "Photosynthesis\nPlants turn light into sugar.".to_string(),
        title: "Photosynthesis".to_string(),
        generated_at: Utc::now(),
        estimated_duration_seconds: 3,
        style: ScriptStyle::Standard,
        requested_duration_seconds: 60,
    }
}

pub struct ScriptedProvider {
    kind: ProviderKind,
    statuses: Mutex<VecDeque<&'static str>>,
    default_status: &'static str,
    fail_create: bool,
    fail_download: bool,
    with_url: bool,
    pub create_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            statuses: Mutex::new(VecDeque::new()),
            default_status: "complete",
            fail_create: false,
            fail_download: false,
            with_url: true,
            create_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_statuses(self, statuses: &[&'static str]) -> Self {
        *self.statuses.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    /// Status reported once the scripted sequence is used up.
    pub fn with_default_status(mut self, status: &'static str) -> Self {
        self.default_status = status;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_download(mut self) -> Self {
        self.fail_download = true;
        self
    }

    pub fn without_download_url(mut self) -> Self {
        self.with_url = false;
        self
    }
}

#[async_trait]
impl VideoProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn create_video(&self, _script: &Script) -> Result<RenderJob> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(PipelineError::provider(
                Some(401),
                format!("{} API error: 401 - invalid key", self.kind.display_name()),
            ));
        }
        Ok(RenderJob::submitted(format!("{}-job", self.kind.tag())))
    }

    async fn get_status(&self, job_id: &str) -> Result<RenderJob> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let raw = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_status);
        let url = self
            .with_url
            .then(|| format!("https://cdn.test/{}.mp4", job_id));
        Ok(RenderJob::from_raw(job_id, raw, url))
    }

    async fn download_artifact(&self, _url: &str) -> Result<Vec<u8>> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_download {
            return Err(PipelineError::provider(
                Some(404),
                "Failed to download video: 404 Not Found",
            ));
        }
        Ok(b"video-bytes".to_vec())
    }
}
