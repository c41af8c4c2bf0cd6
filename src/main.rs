use ai_lesson_videos::cli::{Args, Command};
use ai_lesson_videos::generator::run_generation;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let code = match args.command {
        Command::Generate(generate) => run_generation(generate).await?,
    };
    std::process::exit(code);
}
