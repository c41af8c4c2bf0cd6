use crate::api::http::{self, endpoint};
use crate::config::DeepBrainSettings;
use crate::error::{PipelineError, Result};
use crate::script::Script;
use crate::video::provider::VideoProvider;
use crate::video::types::{ProviderKind, RenderJob};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "DeepBrainAI";

#[derive(Debug, Serialize)]
struct VideoRequest<'a> {
    language: &'a str,
    text: &'a str,
    model: &'a str,
    clothes: &'a str,
}

#[derive(Debug, Deserialize)]
struct VideoResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "download_url")]
    download_url: Option<String>,
}

pub struct DeepBrainClient {
    client: Client,
    settings: DeepBrainSettings,
}

impl DeepBrainClient {
    pub fn new(client: Client, settings: DeepBrainSettings) -> Self {
        Self { client, settings }
    }

    fn require_key(&self) -> Result<&str> {
        let key = self.settings.api_key.trim();
        if key.is_empty() {
            return Err(PipelineError::Configuration(
                "DeepBrainAI API key is not configured. Please add your API key to appsettings.json"
                    .to_string(),
            ));
        }
        Ok(key)
    }
}

#[async_trait]
impl VideoProvider for DeepBrainClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DeepBrain
    }

    async fn create_video(&self, script: &Script) -> Result<RenderJob> {
        let key = self.require_key()?;

        let body = VideoRequest {
            language: &self.settings.language,
            text: &script.content,
            model: &self.settings.model,
            clothes: &self.settings.clothes,
        };

        let url = endpoint(&self.settings.base_url, "simple/video");
        let raw = http::send_for_text(
            SERVICE,
            self.client
                .post(&url)
                .header("Authorization", key)
                .json(&body),
        )
        .await?;

        let resp: VideoResponse = http::parse_body(SERVICE, &raw)?;
        if !resp.success {
            let detail = resp
                .message
                .map(|m| format!(": {}", m))
                .unwrap_or_default();
            return Err(PipelineError::provider(
                None,
                format!("DeepBrainAI API returned unsuccessful response{}", detail),
            ));
        }

        let project_key = resp
            .key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::EmptyResponse("DeepBrainAI API returned no project key".to_string())
            })?;

        Ok(RenderJob::submitted(project_key))
    }

    async fn get_status(&self, job_id: &str) -> Result<RenderJob> {
        let key = self.require_key()?;

        let url = endpoint(&self.settings.base_url, &format!("simple/video/{}", job_id));
        let raw = http::send_for_text(
            SERVICE,
            self.client.get(&url).header("Authorization", key),
        )
        .await?;

        let resp: ProjectResponse = http::parse_body(SERVICE, &raw)?;
        let status = resp.status.unwrap_or_default();
        Ok(RenderJob::from_raw(
            resp.key.unwrap_or_else(|| job_id.to_string()),
            &status,
            resp.download_url,
        ))
    }

    async fn download_artifact(&self, url: &str) -> Result<Vec<u8>> {
        http::download_bytes(&self.client, url).await
    }
}
