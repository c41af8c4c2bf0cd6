use anyhow::Result;
use std::path::Path;
use tokio::fs;

use crate::config::Config;
use crate::video::types::ProviderKind;

pub async fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).await?;
        eprintln!("[INFO] Created directory: {}", dir.display());
    }
    Ok(())
}

/// One warning per missing credential. Nothing is fatal here; the
/// affected client reports a configuration error when it is used.
pub fn credential_warnings(cfg: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if cfg.gemini.api_key.trim().is_empty() {
        warnings.push(
            "Gemini API key not configured. Set GeminiApi.ApiKey or GEMINI_API_KEY.".to_string(),
        );
    }
    let configured = cfg.configured_providers();
    for kind in ProviderKind::ALL {
        if !configured.contains(&kind) {
            warnings.push(format!(
                "{} API key not configured. Video creation with it will fail.",
                kind.display_name()
            ));
        }
    }
    if configured.is_empty() {
        warnings.push("No video provider API key is configured.".to_string());
    }
    warnings
}

pub fn check_credentials(cfg: &Config) -> bool {
    let warnings = credential_warnings(cfg);
    for w in &warnings {
        eprintln!("[WARNING] {}", w);
    }
    warnings.is_empty()
}
