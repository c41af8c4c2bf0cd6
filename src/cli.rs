//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::script::{DEFAULT_DURATION_SECONDS, MAX_DURATION_SECONDS, MIN_DURATION_SECONDS, ScriptStyle};
use crate::video::types::ProviderKind;

/// Turn study material into a narrated avatar video
#[derive(Parser, Debug)]
#[command(name = "ai-lesson-videos")]
#[command(version, about = "Generate learning videos from text with Gemini and an avatar video API", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a script from text and render it as a video
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Text file to read (reads stdin until two blank lines when omitted)
    pub file: Option<PathBuf>,

    /// Script style: standard, storytelling, documentary, tutorial,
    /// explainer, case-study, conversational (or 1-7)
    #[arg(long, short, default_value = "standard")]
    pub style: ScriptStyle,

    /// Target narration length in seconds
    #[arg(
        long,
        short,
        default_value_t = DEFAULT_DURATION_SECONDS,
        value_parser = clap::value_parser!(u32).range(MIN_DURATION_SECONDS as i64..=MAX_DURATION_SECONDS as i64)
    )]
    pub duration: u32,

    /// Extra instructions appended to the prompt
    #[arg(long, short)]
    pub instructions: Option<String>,

    /// Preferred video provider (default from config)
    #[arg(long, short)]
    pub provider: Option<ProviderKind>,

    /// Only try the preferred provider
    #[arg(long)]
    pub no_fallback: bool,

    /// Open the finished video in a media player
    #[arg(long)]
    pub play: bool,

    /// Config file path
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}
