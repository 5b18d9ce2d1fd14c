//! CLI module for Notat.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Notat - Audio Summaries and QA
///
/// A local-first CLI tool for summarizing recorded audio and asking
/// questions about the stored summaries.
#[derive(Parser, Debug)]
#[command(name = "notat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Notat and verify configuration
    Init,

    /// Check configuration and database status
    Doctor,

    /// Transcribe and summarize a recorded audio file
    Summarize {
        /// Path to the audio file (wav)
        audio: String,

        /// Name to store the summary under (defaults to a timestamp name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List stored summaries, newest first
    List,

    /// Show one stored summary
    Show {
        /// Filename the summary is stored under
        filename: String,
    },

    /// Rename a stored summary
    Rename {
        /// Current filename
        old: String,
        /// New filename
        new: String,
    },

    /// Delete a stored summary
    Delete {
        /// Filename the summary is stored under
        filename: String,
    },

    /// Link a summary into the vector index for retrieval
    Link {
        /// Filename the summary is stored under
        filename: String,
    },

    /// Ask a question about a stored summary
    Ask {
        /// Filename the summary is stored under
        filename: String,

        /// The question to ask
        question: String,

        /// Answer via similarity retrieval instead of the summary directly
        #[arg(short, long)]
        retrieval: bool,

        /// Number of context matches in retrieval mode
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Override the configured answering model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value (e.g. `notat config set qa.top_k 3`)
    Set {
        /// Dotted key, like `qa.top_k` or `summarization.model`
        key: String,
        /// New value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
