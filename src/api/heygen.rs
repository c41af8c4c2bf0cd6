use crate::api::http::{self, endpoint};
use crate::config::HeyGenSettings;
use crate::error::{PipelineError, Result};
use crate::script::Script;
use crate::video::provider::VideoProvider;
use crate::video::types::{ProviderKind, RenderJob};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "HeyGen";
const SUCCESS_CODE: i64 = 100;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    video_inputs: Vec<VideoInput<'a>>,
    dimension: Dimension,
}

#[derive(Debug, Serialize)]
struct VideoInput<'a> {
    character: Character<'a>,
    voice: Voice<'a>,
}

#[derive(Debug, Serialize)]
struct Character<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    avatar_id: &'a str,
    avatar_style: &'static str,
}

#[derive(Debug, Serialize)]
struct Voice<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    input_text: &'a str,
    voice_id: &'a str,
    speed: f64,
}

#[derive(Debug, Serialize)]
struct Dimension {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct GenerateData {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusData {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// Provider-reported failure inside a 2xx response.
    fn reported_error(&self) -> Option<String> {
        if let Some(err) = self.error.as_ref().filter(|e| !e.is_null()) {
            return Some(describe_error(err));
        }
        match self.code {
            Some(code) if code != SUCCESS_CODE => Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("code {}", code)),
            ),
            _ => None,
        }
    }
}

fn describe_error(err: &serde_json::Value) -> String {
    if let Some(s) = err.as_str() {
        return s.to_string();
    }
    err.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}

pub struct HeyGenClient {
    client: Client,
    settings: HeyGenSettings,
}

impl HeyGenClient {
    pub fn new(client: Client, settings: HeyGenSettings) -> Self {
        Self { client, settings }
    }

    fn require_key(&self) -> Result<&str> {
        let key = self.settings.api_key.trim();
        if key.is_empty() {
            return Err(PipelineError::Configuration(
                "HeyGen API key is not configured. Please add your API key to appsettings.json"
                    .to_string(),
            ));
        }
        Ok(key)
    }
}

#[async_trait]
impl VideoProvider for HeyGenClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::HeyGen
    }

    async fn create_video(&self, script: &Script) -> Result<RenderJob> {
        let key = self.require_key()?;

        let body = GenerateRequest {
            video_inputs: vec![VideoInput {
                character: Character {
                    kind: "avatar",
                    avatar_id: &self.settings.avatar_id,
                    avatar_style: "normal",
                },
                voice: Voice {
                    kind: "text",
                    input_text: &script.content,
                    voice_id: &self.settings.voice_id,
                    speed: self.settings.voice_speed,
                },
            }],
            dimension: Dimension {
                width: self.settings.width,
                height: self.settings.height,
            },
        };

        let url = endpoint(&self.settings.base_url, "v2/video/generate");
        let raw = http::send_for_text(
            SERVICE,
            self.client.post(&url).header("X-Api-Key", key).json(&body),
        )
        .await?;

        let envelope: Envelope<GenerateData> = http::parse_body(SERVICE, &raw)?;
        if let Some(reason) = envelope.reported_error() {
            return Err(PipelineError::provider(
                None,
                format!("HeyGen API returned error: {}", reason),
            ));
        }

        let video_id = envelope
            .data
            .and_then(|d| d.video_id)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::EmptyResponse("HeyGen API returned no video id".to_string())
            })?;

        Ok(RenderJob::submitted(video_id))
    }

    async fn get_status(&self, job_id: &str) -> Result<RenderJob> {
        let key = self.require_key()?;

        let url = endpoint(&self.settings.base_url, "v1/video_status.get");
        let raw = http::send_for_text(
            SERVICE,
            self.client
                .get(&url)
                .query(&[("video_id", job_id)])
                .header("X-Api-Key", key),
        )
        .await?;

        let envelope: Envelope<StatusData> = http::parse_body(SERVICE, &raw)?;
        if let Some(reason) = envelope.reported_error() {
            return Err(PipelineError::provider(
                None,
                format!("HeyGen API error: {}", reason),
            ));
        }

        let data = envelope.data.ok_or_else(|| {
            PipelineError::EmptyResponse("HeyGen status response had no data".to_string())
        })?;

        let id = data.id.unwrap_or_else(|| job_id.to_string());
        let raw_status = data.status.unwrap_or_default();
        Ok(RenderJob::from_raw(id, &raw_status, data.video_url)
            .with_error(data.error.as_ref().filter(|e| !e.is_null()).map(describe_error)))
    }

    async fn download_artifact(&self, url: &str) -> Result<Vec<u8>> {
        http::download_bytes(&self.client, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_code_other_than_100_is_an_error() {
        let env: Envelope<GenerateData> =
            serde_json::from_str(r#"{"code": 400, "message": "avatar not found", "data": null}"#).unwrap();
        assert_eq!(env.reported_error().as_deref(), Some("avatar not found"));

        let env: Envelope<GenerateData> =
            serde_json::from_str(r#"{"code": 100, "data": {"video_id": "v1"}}"#).unwrap();
        assert_eq!(env.reported_error(), None);
    }

    #[test]
    fn envelope_error_object_is_reported() {
        let env: Envelope<GenerateData> = serde_json::from_str(
            r#"{"error": {"code": "invalid_parameter", "message": "voice_id is invalid"}, "data": null}"#,
        )
        .unwrap();
        assert_eq!(env.reported_error().as_deref(), Some("voice_id is invalid"));

        let env: Envelope<GenerateData> =
            serde_json::from_str(r#"{"error": null, "data": {"video_id": "v2"}}"#).unwrap();
        assert_eq!(env.reported_error(), None);
    }

    #[test]
    fn envelope_parses_without_data_field() {
        let env: Envelope<StatusData> = serde_json::from_str(r#"{"code": 100}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.reported_error(), None);

        let env: Envelope<StatusData> =
            serde_json::from_str(r#"{"code": 100, "data": {"status": "processing"}}"#).unwrap();
        assert_eq!(env.data.and_then(|d| d.status).as_deref(), Some("processing"));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = HeyGenClient::new(
            Client::new(),
            HeyGenSettings {
                base_url: "http://127.0.0.1:1".to_string(),
                ..HeyGenSettings::default()
            },
        );
        let err = client.get_status("v1").await.unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }
}
