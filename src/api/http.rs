//! Request plumbing shared by the API clients. Transport failures and non-2xx
//! responses come back as `PipelineError::Provider` values.

use crate::error::{PipelineError, Result};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

const BODY_SNIPPET_CHARS: usize = 800;

/// Send a request and return the raw body of a 2xx response.
///
/// A non-2xx response fails with `"{service} API error: {status} - {body}"`.
pub async fn send_for_text(service: &str, request: RequestBuilder) -> Result<String> {
    let resp = request
        .send()
        .await
        .map_err(|e| PipelineError::from(e).context(format!("Error calling {} API", service)))?;

    let status = resp.status();
    let raw = resp.text().await.map_err(|e| {
        PipelineError::from(e).context(format!("Error reading {} API response", service))
    })?;
    tracing::debug!(service, status = status.as_u16(), bytes = raw.len(), "API response");

    if !status.is_success() {
        return Err(PipelineError::provider(
            Some(status.as_u16()),
            format!("{} API error: {} - {}", service, status, raw),
        ));
    }

    Ok(raw)
}

/// Parse a success body; malformed JSON counts as an unusable payload.
pub fn parse_body<T: DeserializeOwned>(service: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        PipelineError::EmptyResponse(format!(
            "Unreadable response from {} API ({}): {}",
            service,
            e,
            snippet(raw)
        ))
    })
}

/// Plain GET of a binary payload.
pub async fn download_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| PipelineError::from(e).context("Error downloading video"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PipelineError::provider(
            Some(status.as_u16()),
            format!("Failed to download video: {}", status),
        ));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| PipelineError::from(e).context("Error downloading video"))?;
    tracing::debug!(url, bytes = bytes.len(), "artifact downloaded");
    Ok(bytes.to_vec())
}

pub fn snippet(raw: &str) -> String {
    raw.chars().take(BODY_SNIPPET_CHARS).collect()
}

/// Join a base URL and a path without doubling the slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
