//! CLI module for Recap.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Recap - Playlist Transcript Summarization
///
/// Fetches the transcripts of a video playlist and summarizes them with an LLM,
/// one summary per video plus a digest for the whole playlist.
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
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
    /// Fetch the transcripts of every video in a playlist
    Fetch {
        /// Playlist URL (must contain a `list=` parameter)
        playlist_url: String,

        /// Output directory (default: <transcripts_dir>/<playlist id>)
        #[arg(short, long)]
        output: Option<String>,

        /// Re-fetch transcripts that already exist
        #[arg(short, long)]
        force: bool,
    },

    /// Summarize the transcripts of a playlist
    Summarize {
        /// Playlist directory name under the transcripts directory
        playlist: Option<String>,

        /// Directory containing one transcript directory per playlist
        #[arg(short = 'd', long)]
        transcripts_dir: Option<String>,

        /// Model to use (default: backend.default_model)
        #[arg(short, long)]
        model: Option<String>,

        /// Directory receiving one summary directory per playlist
        #[arg(short, long)]
        output: Option<String>,

        /// Transcript file to summarize (repeatable; default: all)
        #[arg(long = "video")]
        videos: Vec<String>,

        /// Summarize the summaries into a playlist digest afterwards
        #[arg(short, long)]
        reduce: bool,
    },

    /// Summarize the existing summaries of a playlist into a digest
    Reduce {
        /// Playlist directory name under the summaries directory
        playlist: String,

        /// Model to use (default: backend.default_model)
        #[arg(short, long)]
        model: Option<String>,

        /// Directory containing one summary directory per playlist
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List playlists, or the transcripts of one playlist
    List {
        /// Playlist to show transcripts for
        playlist: Option<String>,

        /// Directory containing one transcript directory per playlist
        #[arg(short = 'd', long)]
        transcripts_dir: Option<String>,

        /// Directory containing one summary directory per playlist
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start the HTTP health-check server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Check system requirements and configuration
    Doctor,

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

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
