pub mod deepbrain;
pub mod gemini;
pub mod heygen;
pub mod http;
pub mod synthesia;

use crate::config::Config;
use crate::video::provider::VideoProvider;
use crate::video::types::ProviderKind;
use std::sync::Arc;

/// Client for one backend, sharing the given HTTP client.
pub fn build_provider(
    kind: ProviderKind,
    client: &reqwest::Client,
    cfg: &Config,
) -> Arc<dyn VideoProvider> {
    match kind {
        ProviderKind::HeyGen => Arc::new(heygen::HeyGenClient::new(client.clone(), cfg.heygen.clone())),
        ProviderKind::Synthesia => Arc::new(synthesia::SynthesiaClient::new(
            client.clone(),
            cfg.synthesia.clone(),
        )),
        ProviderKind::DeepBrain => Arc::new(deepbrain::DeepBrainClient::new(
            client.clone(),
            cfg.deepbrain.clone(),
        )),
    }
}
