//! Contract shared by every video rendering backend.

use crate::error::Result;
use crate::script::Script;
use crate::video::types::{ProviderKind, RenderJob};
use async_trait::async_trait;

/// A remote text-to-video service: submit, query, fetch.
///
/// Implementations own their credential and base URL; they never mutate a
/// job locally, every status change comes from a fresh `get_status` call.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Submit a render job for the script's narration.
    async fn create_video(&self, script: &Script) -> Result<RenderJob>;

    /// Fetch the current state of a previously submitted job.
    async fn get_status(&self, job_id: &str) -> Result<RenderJob>;

    /// Plain GET of a finished artifact.
    async fn download_artifact(&self, url: &str) -> Result<Vec<u8>>;

    fn name(&self) -> &'static str {
        self.kind().display_name()
    }
}
