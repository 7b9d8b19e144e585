//! LikenessAI CLI binary.
//!
//! This binary provides command-line access to the engine:
//! - Analyze and score training footage
//! - Generate emotion clips and identity embeddings
//! - Refine likeness images and validate generated media
//! - Manage actor profiles

use anyhow::Result;
use clap::Parser;
use likeness::observability::{ObservabilityConfig, init_observability};
use likeness::{Feature, LikenessConfig, LikenessEngine};

mod cli;

use cli::{Cli, Commands, GenerateOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LikenessConfig::from_file(path)?,
        None => LikenessConfig::load()?,
    };

    let mut observability = ObservabilityConfig::default()
        .with_json_logs(cli.json_logs)
        .with_metrics(config.features.is_enabled(Feature::Analytics));
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    let guard = init_observability(&observability)?;

    let result = run(cli, config).await;
    guard.shutdown()?;
    result
}

async fn run(cli: Cli, config: LikenessConfig) -> Result<()> {
    let format = cli.format;

    // Commands that never touch the provider run without credentials
    let engine = match &cli.command {
        Commands::Flags | Commands::Emotions { profile: None } => offline_engine(config)?,
        _ => LikenessEngine::from_config(config)?,
    };

    match cli.command {
        Commands::Analyze { video } => cli::analyze(&engine, &video, format).await?,

        Commands::Quality { video } => cli::quality(&engine, &video, format).await?,

        Commands::Identity { frames, profile } => {
            cli::identity(&engine, &frames, profile.as_deref(), format).await?
        }

        Commands::Generate {
            image,
            emotion,
            count,
            intensity,
            identity,
            validate,
            profile,
            out_dir,
        } => {
            let options = GenerateOptions {
                image,
                emotion,
                count,
                intensity,
                identity,
                validate,
                profile,
                out_dir,
            };
            cli::generate(&engine, options, format).await?
        }

        Commands::Refine {
            image,
            instructions,
            output,
        } => cli::refine(&engine, &image, instructions, output.as_deref(), format).await?,

        Commands::Validate {
            media,
            identity,
            description,
            threshold,
        } => cli::validate(&engine, &media, &identity, description, threshold, format).await?,

        Commands::Emotions { profile } => {
            cli::emotions(&engine, profile.as_deref(), format).await?
        }

        Commands::Flags => cli::flags(&engine, format)?,

        Commands::Profile(cmd) => cli::handle_profile_command(&engine, cmd, format).await?,
    }

    Ok(())
}

/// Engine for commands that only read configuration.
///
/// A placeholder key is used so the commands work without credentials.
fn offline_engine(config: LikenessConfig) -> Result<LikenessEngine> {
    use likeness::{GeminiGateway, ProfileStoreKind};

    let gateway = GeminiGateway::with_api_key("offline", &config.gateway)?;
    let fetcher = gateway.media_fetcher();
    let store = ProfileStoreKind::Memory.build()?;
    Ok(LikenessEngine::new(config, gateway, fetcher, store))
}
