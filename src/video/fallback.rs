//! Ordered multi-provider fallback on top of [`VideoPipeline`].

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{PipelineError, ProviderFailure, Result};
use crate::script::Script;
use crate::video::pipeline::VideoPipeline;
use crate::video::provider::VideoProvider;
use crate::video::types::ProviderKind;

/// Saved artifact plus the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOutcome {
    pub path: PathBuf,
    pub provider: ProviderKind,
}

pub struct FallbackPipeline {
    providers: Vec<Arc<dyn VideoProvider>>,
    pipeline: VideoPipeline,
    enabled: bool,
}

impl FallbackPipeline {
    pub fn new(providers: Vec<Arc<dyn VideoProvider>>, pipeline: VideoPipeline) -> Self {
        Self {
            providers,
            pipeline,
            enabled: true,
        }
    }

    /// With fallback disabled only the preferred provider is tried.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn providers(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.providers.iter().map(|p| p.kind())
    }

    /// Preferred provider first, the rest in registration order.
    fn attempt_order(&self, preferred: ProviderKind) -> Result<Vec<Arc<dyn VideoProvider>>> {
        let first = self
            .providers
            .iter()
            .find(|p| p.kind() == preferred)
            .cloned()
            .ok_or_else(|| {
                PipelineError::Configuration(format!(
                    "Video provider {} is not configured",
                    preferred.display_name()
                ))
            })?;

        let mut order = vec![first];
        if self.enabled {
            order.extend(
                self.providers
                    .iter()
                    .filter(|p| p.kind() != preferred)
                    .cloned(),
            );
        }
        Ok(order)
    }

    pub async fn process(&self, script: &Script, preferred: ProviderKind) -> Result<VideoOutcome> {
        let order = self.attempt_order(preferred)?;
        let progress = self.pipeline.progress();
        let mut failures: Vec<ProviderFailure> = Vec::new();

        for (idx, provider) in order.iter().enumerate() {
            let kind = provider.kind();
            if idx > 0 {
                progress.info(&format!("Attempting with {}...", provider.name()));
            }

            match self.pipeline.process(provider.as_ref(), script).await {
                Ok(path) => {
                    tracing::info!(provider = kind.tag(), path = %path.display(), "video saved");
                    return Ok(VideoOutcome { path, provider: kind });
                }
                Err(err) => {
                    tracing::warn!(provider = kind.tag(), error = %err, "video provider failed");
                    if !err.triggers_fallback() {
                        if failures.is_empty() {
                            return Err(err);
                        }
                        // Keep the earlier providers' reasons alongside this one.
                        failures.push(ProviderFailure {
                            provider: kind,
                            error: err,
                        });
                        return Err(PipelineError::AllProvidersFailed(failures));
                    }
                    if let Some(next) = order.get(idx + 1) {
                        progress.warn(&format!(
                            "{} failed: {}. Falling back to {}...",
                            provider.name(),
                            err,
                            next.name()
                        ));
                    }
                    failures.push(ProviderFailure {
                        provider: kind,
                        error: err,
                    });
                }
            }
        }

        if failures.len() == 1 {
            // Single attempt: surface the provider's own error unchanged.
            if let Some(only) = failures.pop() {
                return Err(only.error);
            }
        }
        Err(PipelineError::AllProvidersFailed(failures))
    }
}
