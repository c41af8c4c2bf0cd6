//! Provider-neutral render job types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Video rendering backends known to the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    HeyGen,
    Synthesia,
    DeepBrain,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::HeyGen, Self::Synthesia, Self::DeepBrain];

    /// Short lowercase tag used in file names and on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::HeyGen => "heygen",
            Self::Synthesia => "synthesia",
            Self::DeepBrain => "deepbrain",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HeyGen => "HeyGen",
            Self::Synthesia => "Synthesia",
            Self::DeepBrain => "DeepBrain AI",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heygen" => Ok(Self::HeyGen),
            "synthesia" => Ok(Self::Synthesia),
            "deepbrain" | "deepbrainai" | "deepbrain-ai" => Ok(Self::DeepBrain),
            other => Err(format!(
                "unknown video provider '{}' (expected heygen, synthesia or deepbrain)",
                other
            )),
        }
    }
}

/// Common status vocabulary every provider status is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Pending,
    Processing,
    Complete,
    Failed,
    Unknown,
}

impl RenderStatus {
    /// Fold a raw provider status string into the common vocabulary.
    /// Unrecognized strings become `Unknown`; this never fails.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "complete" | "completed" | "done" | "succeeded" | "success" => Self::Complete,
            "failed" | "failure" | "error" | "cancelled" | "canceled" => Self::Failed,
            "pending" | "queued" | "waiting" | "in_queue" => Self::Pending,
            "processing" | "in_progress" | "progress" | "rendering" => Self::Processing,
            _ => Self::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Complete => "complete",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Snapshot of a remote render job as last reported by its provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub id: String,
    pub status: RenderStatus,
    /// Status string exactly as the provider sent it.
    pub raw_status: String,
    pub download_url: Option<String>,
    /// Provider-reported failure detail, when any.
    pub error: Option<String>,
}

impl RenderJob {
    /// A freshly submitted job; providers rarely report a status on create.
    pub fn submitted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: RenderStatus::Pending,
            raw_status: String::from("pending"),
            download_url: None,
            error: None,
        }
    }

    pub fn from_raw(id: impl Into<String>, raw_status: &str, download_url: Option<String>) -> Self {
        Self {
            id: id.into(),
            status: RenderStatus::normalize(raw_status),
            raw_status: raw_status.to_string(),
            download_url: download_url.filter(|u| !u.trim().is_empty()),
            error: None,
        }
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error.filter(|e| !e.trim().is_empty());
        self
    }
}
