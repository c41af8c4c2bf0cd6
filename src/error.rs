//! Error taxonomy shared by script generation, the provider clients and the
//! orchestrators. Every operation reports expected failures as a value of
//! [`PipelineError`]; nothing in the pipeline panics on a remote failure.

use std::fmt;
use std::path::PathBuf;

use crate::video::types::ProviderKind;

/// Coarse error category, stable enough to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidRequest,
    Provider,
    EmptyResponse,
    Timeout,
    FileSystem,
}

/// One provider's failure inside an aggregated fallback error.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: ProviderKind,
    pub error: PipelineError,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Missing credential or unusable setting. Never retried.
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidRequest(String),

    /// Non-2xx HTTP status, provider-reported failure or transport error.
    #[error("{message}")]
    Provider { status: Option<u16>, message: String },

    /// Success envelope without a usable payload.
    #[error("{0}")]
    EmptyResponse(String),

    #[error("{provider} video processing timed out after {minutes} minutes")]
    Timeout { provider: String, minutes: u64 },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{0}")]
    EmptyInput(String),

    #[error("{0}")]
    FileSystem(String),

    #[error("{}", format_failures(.0))]
    AllProvidersFailed(Vec<ProviderFailure>),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

fn format_failures(failures: &[ProviderFailure]) -> String {
    let head = if failures.len() == 2 {
        "Both video providers failed."
    } else {
        "All video providers failed."
    };
    let parts: Vec<String> = failures
        .iter()
        .map(|f| format!("{}: {}", f.provider.display_name(), f.error))
        .collect();
    format!("{} {}", head, parts.join(". "))
}

impl PipelineError {
    pub fn provider(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InvalidRequest(_) | Self::EmptyInput(_) => ErrorKind::InvalidRequest,
            Self::Provider { .. } | Self::AllProvidersFailed(_) => ErrorKind::Provider,
            Self::EmptyResponse(_) => ErrorKind::EmptyResponse,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::NotFound(_) | Self::FileSystem(_) => ErrorKind::FileSystem,
        }
    }

    /// HTTP-like status code describing the failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration(_) | Self::InvalidRequest(_) | Self::EmptyInput(_) => 400,
            Self::Provider { status, .. } => status.unwrap_or(500),
            Self::EmptyResponse(_) => 500,
            Self::Timeout { .. } => 408,
            Self::NotFound(_) => 404,
            Self::FileSystem(_) | Self::AllProvidersFailed(_) => 500,
        }
    }

    /// Whether an orchestrator may retry the whole flow with another provider.
    /// Local file-system failures would repeat on any backend.
    pub fn triggers_fallback(&self) -> bool {
        self.kind() != ErrorKind::FileSystem
    }

    /// Prefix the message with the failing stage, keeping the category.
    pub fn context(self, prefix: impl fmt::Display) -> Self {
        match self {
            Self::Configuration(m) => Self::Configuration(format!("{prefix}: {m}")),
            Self::InvalidRequest(m) => Self::InvalidRequest(format!("{prefix}: {m}")),
            Self::Provider { status, message } => Self::Provider {
                status,
                message: format!("{prefix}: {message}"),
            },
            Self::EmptyResponse(m) => Self::EmptyResponse(format!("{prefix}: {m}")),
            Self::EmptyInput(m) => Self::EmptyInput(format!("{prefix}: {m}")),
            Self::FileSystem(m) => Self::FileSystem(format!("{prefix}: {m}")),
            other => other,
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        Self::Provider {
            status,
            message: format!("HTTP request failed: {err}"),
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem(err.to_string())
    }
}
