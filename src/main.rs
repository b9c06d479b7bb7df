//! Recap CLI entry point.

use anyhow::Result;
use clap::Parser;
use recap::cli::{commands, Cli, Commands};
use recap::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("recap={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_path = cli.config.as_deref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    match &cli.command {
        Commands::Fetch {
            playlist_url,
            output,
            force,
        } => {
            commands::run_fetch(playlist_url, output.clone(), *force, &settings).await?;
        }

        Commands::Summarize {
            playlist,
            transcripts_dir,
            model,
            output,
            videos,
            reduce,
        } => {
            commands::run_summarize(
                playlist.as_deref(),
                transcripts_dir.clone(),
                model.clone(),
                output.clone(),
                videos,
                *reduce,
                &settings,
            )
            .await?;
        }

        Commands::Reduce {
            playlist,
            model,
            output,
        } => {
            commands::run_reduce(playlist, model.clone(), output.clone(), &settings).await?;
        }

        Commands::List {
            playlist,
            transcripts_dir,
            output,
        } => {
            commands::run_list(
                playlist.as_deref(),
                transcripts_dir.clone(),
                output.clone(),
                &settings,
            )?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, config_path)?;
        }
    }

    Ok(())
}
