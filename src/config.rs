use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::video::types::ProviderKind;

pub const DEFAULT_CONFIG_PATH: &str = "appsettings.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "GeminiApi", default)]
    pub gemini: GeminiSettings,
    #[serde(rename = "HeyGenApi", default)]
    pub heygen: HeyGenSettings,
    #[serde(rename = "SynthesiaApi", default)]
    pub synthesia: SynthesiaSettings,
    #[serde(rename = "DeepBrainApi", default)]
    pub deepbrain: DeepBrainSettings,
    #[serde(rename = "Video", default)]
    pub video: VideoSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeyGenSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_heygen_base_url")]
    pub base_url: String,
    #[serde(default = "default_heygen_avatar_id")]
    pub avatar_id: String,
    #[serde(default = "default_heygen_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_heygen_voice_speed")]
    pub voice_speed: f64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SynthesiaSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_synthesia_base_url")]
    pub base_url: String,
    #[serde(default = "default_synthesia_avatar")]
    pub avatar: String,
    #[serde(default = "default_synthesia_background")]
    pub background: String,
    #[serde(default = "default_true")]
    pub test: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeepBrainSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_deepbrain_base_url")]
    pub base_url: String,
    #[serde(default = "default_deepbrain_model")]
    pub model: String,
    #[serde(default = "default_deepbrain_clothes")]
    pub clothes: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VideoSettings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub preferred_provider: ProviderKind,
    #[serde(default = "default_true")]
    pub fallback: bool,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_heygen_base_url() -> String {
    "https://api.heygen.com".to_string()
}

fn default_heygen_avatar_id() -> String {
    "Abigail_expressive_2024112501".to_string()
}

fn default_heygen_voice_id() -> String {
    "73c0b6a2e29d4d38aca41454bf58c955".to_string()
}

fn default_heygen_voice_speed() -> f64 {
    1.1
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_synthesia_base_url() -> String {
    "https://api.synthesia.io/v2".to_string()
}

fn default_synthesia_avatar() -> String {
    "anna_costume1_cameraA".to_string()
}

fn default_synthesia_background() -> String {
    "green_screen".to_string()
}

fn default_deepbrain_base_url() -> String {
    "https://app.deepbrain.io/api/odin/v3".to_string()
}

fn default_deepbrain_model() -> String {
    "ysy".to_string()
}

fn default_deepbrain_clothes() -> String {
    "1".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_max_poll_attempts() -> u32 {
    60
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
        }
    }
}

impl Default for HeyGenSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_heygen_base_url(),
            avatar_id: default_heygen_avatar_id(),
            voice_id: default_heygen_voice_id(),
            voice_speed: default_heygen_voice_speed(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for SynthesiaSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_synthesia_base_url(),
            avatar: default_synthesia_avatar(),
            background: default_synthesia_background(),
            test: true,
        }
    }
}

impl Default for DeepBrainSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_deepbrain_base_url(),
            model: default_deepbrain_model(),
            clothes: default_deepbrain_clothes(),
            language: default_language(),
        }
    }
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_attempts: default_max_poll_attempts(),
            output_dir: default_output_dir(),
            preferred_provider: ProviderKind::default(),
            fallback: true,
        }
    }
}

impl VideoSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Config {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields defaults plus environment credentials.
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if fs::metadata(&path).await.is_ok() {
            return Self::load(path).await;
        }
        tracing::warn!(
            "config file {} not found; using defaults and environment variables",
            path.as_ref().display()
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Fill empty credentials from the environment.
    pub fn apply_env_overrides(&mut self) {
        fill_from_env(&mut self.gemini.api_key, "GEMINI_API_KEY");
        fill_from_env(&mut self.heygen.api_key, "HEYGEN_API_KEY");
        fill_from_env(&mut self.synthesia.api_key, "SYNTHESIA_API_KEY");
        fill_from_env(&mut self.deepbrain.api_key, "DEEPBRAIN_API_KEY");
    }

    pub fn validate(&self) -> Result<()> {
        if self.video.poll_interval_secs == 0 {
            anyhow::bail!("config: Video.PollIntervalSecs must be at least 1");
        }
        if self.video.max_poll_attempts == 0 {
            anyhow::bail!("config: Video.MaxPollAttempts must be at least 1");
        }
        Ok(())
    }

    /// Providers that have a credential configured.
    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| !self.provider_key(*kind).trim().is_empty())
            .collect()
    }

    pub fn provider_key(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::HeyGen => &self.heygen.api_key,
            ProviderKind::Synthesia => &self.synthesia.api_key,
            ProviderKind::DeepBrain => &self.deepbrain.api_key,
        }
    }
}

fn fill_from_env(slot: &mut String, var: &str) {
    if !slot.trim().is_empty() {
        return;
    }
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            *slot = value.trim().to_string();
        }
    }
}
