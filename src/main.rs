//! Notat CLI entry point.

use anyhow::Result;
use clap::Parser;
use notat::cli::{commands, Cli, Commands};
use notat::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("notat={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the data directory exists
    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings).await?;
        }

        Commands::Summarize { audio, name } => {
            commands::run_summarize(audio, name.clone(), settings).await?;
        }

        Commands::List => {
            commands::run_list(settings).await?;
        }

        Commands::Show { filename } => {
            commands::run_show(filename, settings).await?;
        }

        Commands::Rename { old, new } => {
            commands::run_rename(old, new, settings).await?;
        }

        Commands::Delete { filename } => {
            commands::run_delete(filename, settings).await?;
        }

        Commands::Link { filename } => {
            commands::run_link(filename, settings).await?;
        }

        Commands::Ask {
            filename,
            question,
            retrieval,
            top_k,
            model,
        } => {
            commands::run_ask(filename, question, *retrieval, *top_k, model.clone(), settings)
                .await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
