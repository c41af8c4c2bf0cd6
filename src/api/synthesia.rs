use crate::api::http::{self, endpoint};
use crate::config::SynthesiaSettings;
use crate::error::{PipelineError, Result};
use crate::script::Script;
use crate::video::provider::VideoProvider;
use crate::video::types::{ProviderKind, RenderJob};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "Synthesia";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoRequest<'a> {
    test: bool,
    title: &'a str,
    input: Vec<VideoInput<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoInput<'a> {
    avatar: &'a str,
    background: &'a str,
    script_text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "download")]
    download_url: Option<String>,
}

pub struct SynthesiaClient {
    client: Client,
    settings: SynthesiaSettings,
}

impl SynthesiaClient {
    pub fn new(client: Client, settings: SynthesiaSettings) -> Self {
        Self { client, settings }
    }

    fn require_key(&self) -> Result<&str> {
        let key = self.settings.api_key.trim();
        if key.is_empty() {
            return Err(PipelineError::Configuration(
                "Synthesia API key is not configured. Please add your API key to appsettings.json"
                    .to_string(),
            ));
        }
        Ok(key)
    }
}

#[async_trait]
impl VideoProvider for SynthesiaClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Synthesia
    }

    async fn create_video(&self, script: &Script) -> Result<RenderJob> {
        let key = self.require_key()?;

        let body = VideoRequest {
            test: self.settings.test,
            title: &script.title,
            input: vec![VideoInput {
                avatar: &self.settings.avatar,
                background: &self.settings.background,
                script_text: &script.content,
            }],
        };

        let url = endpoint(&self.settings.base_url, "videos");
        let raw = http::send_for_text(
            SERVICE,
            self.client.post(&url).bearer_auth(key).json(&body),
        )
        .await?;

        let resp: VideoResponse = http::parse_body(SERVICE, &raw)?;
        let id = resp
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::EmptyResponse("No response received from Synthesia API".to_string())
            })?;

        Ok(match resp.status {
            Some(status) => RenderJob::from_raw(id, &status, resp.download_url),
            None => RenderJob::submitted(id),
        })
    }

    async fn get_status(&self, job_id: &str) -> Result<RenderJob> {
        let key = self.require_key()?;

        let url = endpoint(&self.settings.base_url, &format!("videos/{}", job_id));
        let raw = http::send_for_text(SERVICE, self.client.get(&url).bearer_auth(key)).await?;

        let resp: VideoResponse = http::parse_body(SERVICE, &raw)?;
        let status = resp.status.unwrap_or_default();
        Ok(RenderJob::from_raw(
            resp.id.unwrap_or_else(|| job_id.to_string()),
            &status,
            resp.download_url,
        ))
    }

    async fn download_artifact(&self, url: &str) -> Result<Vec<u8>> {
        http::download_bytes(&self.client, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_fields() {
        let body = VideoRequest {
            test: true,
            title: "Plants",
            input: vec![VideoInput {
                avatar: "anna_costume1_cameraA",
                background: "green_screen",
                script_text: "Plants eat light.",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["input"][0]["scriptText"], "Plants eat light.");
        assert_eq!(value["test"], true);
    }

    #[test]
    fn response_accepts_either_download_field() {
        let a: VideoResponse =
            serde_json::from_str(r#"{"id":"s1","status":"complete","download":"https://cdn/x.mp4"}"#).unwrap();
        assert_eq!(a.download_url.as_deref(), Some("https://cdn/x.mp4"));
        let b: VideoResponse =
            serde_json::from_str(r#"{"id":"s1","status":"complete","downloadUrl":"https://cdn/y.mp4"}"#).unwrap();
        assert_eq!(b.download_url.as_deref(), Some("https://cdn/y.mp4"));
    }
}
