use crate::api::http::{self, endpoint};
use crate::config::GeminiSettings;
use crate::error::{PipelineError, Result};
use crate::script::{word_budget, Script, ScriptGenerationRequest};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const SERVICE: &str = "Gemini";
const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;
const MIN_OUTPUT_TOKENS: u32 = 1024;
const MAX_OUTPUT_TOKENS: u32 = 8192;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Token cap sized to the requested word budget.
pub fn max_output_tokens(duration_seconds: u32) -> u32 {
    (word_budget(duration_seconds) * 2).clamp(MIN_OUTPUT_TOKENS, MAX_OUTPUT_TOKENS)
}

/// First candidate's first text part, if any.
pub fn gemini_extract_text(root: &serde_json::Value) -> Option<String> {
    let text = root
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?
        .first()?
        .get("text")?
        .as_str()?;
    if text.trim().is_empty() {
        return None;
    }
    Some(text.to_string())
}

/// Turns input text into a narration script through the Gemini API.
pub struct ScriptGenerator {
    client: Client,
    settings: GeminiSettings,
}

impl ScriptGenerator {
    pub fn new(client: Client, settings: GeminiSettings) -> Self {
        Self { client, settings }
    }

    pub async fn generate(&self, request: &ScriptGenerationRequest) -> Result<Script> {
        if self.settings.api_key.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "Gemini API key is not configured. Please add your API key to appsettings.json"
                    .to_string(),
            ));
        }

        let body = json!({
            "contents": [
                { "parts": [ { "text": request.build_prompt() } ] }
            ],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "topK": TOP_K,
                "topP": TOP_P,
                "maxOutputTokens": max_output_tokens(request.duration_seconds()),
            },
        });

        let url = endpoint(
            &self.settings.base_url,
            &format!("models/{}:generateContent", self.settings.model),
        );
        tracing::debug!(%url, style = %request.style(), "requesting script");

        let raw = http::send_for_text(
            SERVICE,
            self.client
                .post(&url)
                .header("x-goog-api-key", &self.settings.api_key)
                .json(&body)
                .timeout(REQUEST_TIMEOUT),
        )
        .await?;

        let root: serde_json::Value = http::parse_body(SERVICE, &raw)?;
        let text = gemini_extract_text(&root).ok_or_else(|| {
            PipelineError::EmptyResponse("No content received from Gemini API".to_string())
        })?;

        Script::from_generated_text(&text, request)
    }
}
