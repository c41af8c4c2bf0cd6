//! Single-provider video flow: create, poll until terminal, download, save.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{PipelineError, Result};
use crate::progress::Progress;
use crate::script::Script;
use crate::video::provider::VideoProvider;
use crate::video::types::{ProviderKind, RenderJob, RenderStatus};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;
pub const MAX_TITLE_CHARS: usize = 50;
pub const VIDEO_EXTENSION: &str = "mp4";

const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Fixed-interval polling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl PollSettings {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Upper bound on time spent polling one job.
    pub fn ceiling(&self) -> Duration {
        self.interval * self.max_attempts
    }

    pub fn ceiling_minutes(&self) -> u64 {
        self.ceiling().as_secs() / 60
    }
}

pub struct VideoPipeline {
    poll: PollSettings,
    output_dir: PathBuf,
    progress: Arc<dyn Progress>,
}

impl VideoPipeline {
    pub fn new(output_dir: impl Into<PathBuf>, progress: Arc<dyn Progress>) -> Self {
        Self {
            poll: PollSettings::default(),
            output_dir: output_dir.into(),
            progress,
        }
    }

    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn progress(&self) -> &Arc<dyn Progress> {
        &self.progress
    }

    /// Run the whole flow against one provider and return the saved file path.
    pub async fn process(&self, provider: &dyn VideoProvider, script: &Script) -> Result<PathBuf> {
        let name = provider.name();

        self.progress.info(&format!("Creating video with {}...", name));
        let job = provider
            .create_video(script)
            .await
            .map_err(|e| e.context(format!("Failed to create video with {}", name)))?;
        self.progress
            .ok(&format!("{} video creation started. Job ID: {}", name, job.id));
        self.progress
            .info("Video is being processed. This typically takes 3-5 minutes...");

        let finished = self.poll_until_terminal(provider, &job.id).await?;

        let url = finished.download_url.ok_or_else(|| {
            PipelineError::provider(
                None,
                format!("{} video completed but no download URL provided", name),
            )
        })?;

        self.progress.info(&format!("Downloading {} video...", name));
        let bytes = provider
            .download_artifact(&url)
            .await
            .map_err(|e| e.context(format!("Failed to download {} video", name)))?;

        let path = save_artifact(&self.output_dir, provider.kind(), &script.title, &bytes, Local::now())
            .await
            .map_err(|e| e.context(format!("Error saving {} video", name)))?;

        let size_mb = bytes.len() as f64 / 1024.0 / 1024.0;
        self.progress
            .ok(&format!("{} video saved: {}", name, path.display()));
        self.progress.info(&format!("File size: {:.2} MB", size_mb));
        Ok(path)
    }

    /// Poll until the job completes, fails, or the attempt budget runs out.
    /// Sleeps only between attempts, never after the last one.
    pub async fn poll_until_terminal(
        &self,
        provider: &dyn VideoProvider,
        job_id: &str,
    ) -> Result<RenderJob> {
        let name = provider.name();
        let max = self.poll.max_attempts;

        for attempt in 1..=max {
            self.progress.info(&format!(
                "Checking {} video status... (Attempt {}/{})",
                name, attempt, max
            ));

            let job = provider
                .get_status(job_id)
                .await
                .map_err(|e| e.context("Failed to check video status"))?;
            self.progress.info(&format!("Video status: {}", job.raw_status));

            if job.status.is_terminal() {
                return self.settle(name, job);
            }
            if job.status == RenderStatus::Unknown {
                self.progress.warn(&format!(
                    "Unknown status: {}. Continuing to poll...",
                    job.raw_status
                ));
            }

            if attempt < max {
                tokio::time::sleep(self.poll.interval).await;
            }
        }

        tracing::warn!(provider = name, attempts = max, "polling budget exhausted");
        Err(PipelineError::Timeout {
            provider: name.to_string(),
            minutes: self.poll.ceiling_minutes(),
        })
    }

    /// Outcome of a job that reached a terminal status.
    fn settle(&self, name: &str, job: RenderJob) -> Result<RenderJob> {
        if job.status == RenderStatus::Complete {
            self.progress
                .ok(&format!("{} video processing completed!", name));
            return Ok(job);
        }
        let detail = job
            .error
            .as_deref()
            .map(|e| format!(": {}", e))
            .unwrap_or_default();
        Err(PipelineError::provider(
            None,
            format!("Video processing failed on {} platform{}", name, detail),
        ))
    }
}

/// Replace characters that are invalid in file names and cap the length.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| {
            if c.is_control() || INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .take(MAX_TITLE_CHARS)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `{tag}_video_{YYYYMMDD_HHMMSS}_{title}.mp4`
pub fn artifact_file_name(provider: ProviderKind, title: &str, at: DateTime<Local>) -> String {
    format!(
        "{}_video_{}_{}.{}",
        provider.tag(),
        at.format("%Y%m%d_%H%M%S"),
        sanitize_title(title),
        VIDEO_EXTENSION
    )
}

/// Write the artifact under `output_dir`, creating it if needed.
/// Never overwrites an existing file.
pub async fn save_artifact(
    output_dir: &Path,
    provider: ProviderKind,
    title: &str,
    bytes: &[u8],
    at: DateTime<Local>,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).await.map_err(|e| {
        PipelineError::FileSystem(format!(
            "Failed to create output directory {}: {}",
            output_dir.display(),
            e
        ))
    })?;

    let path = output_dir.join(artifact_file_name(provider, title, at));
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
        .map_err(|e| PipelineError::FileSystem(format!("Failed to create {}: {}", path.display(), e)))?;
    file.write_all(bytes).await?;
    file.flush().await?;

    Ok(path)
}
