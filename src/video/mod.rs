pub mod fallback;
pub mod pipeline;
pub mod provider;
pub mod types;

#[cfg(test)]
mod testing;

pub use fallback::{FallbackPipeline, VideoOutcome};
pub use pipeline::{PollSettings, VideoPipeline};
pub use provider::VideoProvider;
pub use types::{ProviderKind, RenderJob, RenderStatus};
