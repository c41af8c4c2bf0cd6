use crate::api::build_provider;
use crate::api::gemini::ScriptGenerator;
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{PipelineError, Result as PipelineResult};
use crate::init;
use crate::input::{self, InputText};
use crate::platform;
use crate::progress::{ConsoleProgress, Progress};
use crate::script::{Script, ScriptGenerationRequest, ScriptStyle};
use crate::video::{FallbackPipeline, PollSettings, VideoOutcome, VideoPipeline, VideoProvider};
use crate::video::types::ProviderKind;
use anyhow::{Context, Result};
use std::sync::Arc;

pub const PREVIEW_CHARS: usize = 300;

/// Per-run choices, already resolved against the configuration.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub style: ScriptStyle,
    pub duration_seconds: u32,
    pub instructions: Option<String>,
    pub preferred: ProviderKind,
    pub fallback: bool,
}

impl GenerationOptions {
    pub fn from_args(args: &GenerateArgs, cfg: &Config) -> Self {
        Self {
            style: args.style,
            duration_seconds: args.duration,
            instructions: args.instructions.clone(),
            preferred: args.provider.unwrap_or(cfg.video.preferred_provider),
            fallback: cfg.video.fallback && !args.no_fallback,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub script: Script,
    pub video: VideoOutcome,
}

pub fn build_fallback_pipeline(
    client: &reqwest::Client,
    cfg: &Config,
    progress: Arc<dyn Progress>,
    fallback: bool,
) -> FallbackPipeline {
    let providers: Vec<Arc<dyn VideoProvider>> = ProviderKind::ALL
        .into_iter()
        .map(|kind| build_provider(kind, client, cfg))
        .collect();
    let pipeline = VideoPipeline::new(cfg.video.output_dir.clone(), progress).with_poll_settings(
        PollSettings::new(cfg.video.poll_interval(), cfg.video.max_poll_attempts),
    );
    FallbackPipeline::new(providers, pipeline).with_fallback(fallback)
}

/// Input text to saved video: one script generation, then the provider flow.
pub async fn generate_lesson_video(
    client: &reqwest::Client,
    cfg: &Config,
    input: &InputText,
    opts: &GenerationOptions,
    progress: Arc<dyn Progress>,
) -> PipelineResult<GenerationResult> {
    let request = ScriptGenerationRequest::new(
        input.content.as_str(),
        opts.style,
        opts.duration_seconds,
        opts.instructions.clone(),
    )?;

    progress.info(&format!(
        "Generating {} script ({:.1} min target)...",
        opts.style.display_name(),
        request.duration_minutes()
    ));
    let generator = ScriptGenerator::new(client.clone(), cfg.gemini.clone());
    let script = generator.generate(&request).await?;
    progress.ok(&format!("Script generated: {}", script.title));
    progress.info(&format!(
        "Words: {} | Requested: {:.1} min | Estimated: {:.1} min",
        script.word_count(),
        script.requested_minutes(),
        script.estimated_minutes()
    ));

    let videos = build_fallback_pipeline(client, cfg, progress, opts.fallback);
    let video = videos.process(&script, opts.preferred).await?;

    Ok(GenerationResult { script, video })
}

async fn acquire_input(args: &GenerateArgs) -> PipelineResult<InputText> {
    match &args.file {
        Some(path) => input::read_input_file(path).await,
        None => {
            eprintln!("Enter or paste your text (press Enter twice on an empty line to finish):");
            tokio::task::spawn_blocking(|| input::read_console_input(std::io::stdin().lock()))
                .await
                .map_err(|e| PipelineError::FileSystem(format!("stdin reader failed: {}", e)))?
        }
    }
}

fn print_script(script: &Script) {
    println!("\n=== Generated Script ===");
    println!("Title: {}", script.title);
    println!("Style: {}", script.style.display_name());
    println!(
        "Duration: {:.1} min requested, {:.1} min estimated ({} words)",
        script.requested_minutes(),
        script.estimated_minutes(),
        script.word_count()
    );
    println!("\n{}\n", script.content);
}

/// Entry point for `generate`. Returns the process exit code.
pub async fn run_generation(args: GenerateArgs) -> Result<i32> {
    let cfg = Config::load_or_default(&args.config).await?;
    init::check_credentials(&cfg);
    init::ensure_output_dir(&cfg.video.output_dir).await?;

    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let progress: Arc<dyn Progress> = Arc::new(ConsoleProgress);

    let input = match acquire_input(&args).await {
        Ok(input) => input,
        Err(err) => {
            progress.log("ERROR", &err.to_string());
            return Ok(1);
        }
    };
    progress.ok(&format!(
        "Input loaded from {} ({} characters)",
        input.source,
        input.char_count()
    ));

    let opts = GenerationOptions::from_args(&args, &cfg);
    let result = match generate_lesson_video(&client, &cfg, &input, &opts, progress.clone()).await {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(kind = ?err.kind(), status = err.status_code(), "generation failed");
            progress.log("ERROR", &err.to_string());
            return Ok(1);
        }
    };

    print_script(&result.script);
    println!(
        "Video ({}): {}",
        result.video.provider.display_name(),
        result.video.path.display()
    );

    if args.play {
        match platform::play_video(&result.video.path) {
            Ok(player) => progress.ok(&format!("Opened video with {}", player)),
            Err(e) => progress.warn(&e),
        }
    }

    println!("\n--- Script preview ---");
    println!("{}", result.script.preview(PREVIEW_CHARS));
    Ok(0)
}
