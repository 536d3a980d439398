//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyteller - narrated sleep stories from a single prompt
#[derive(Parser, Debug)]
#[command(name = "storyteller")]
#[command(about = "Narrated sleep stories from a single prompt", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of ./storyteller.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Interface to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write and narrate one story in-process, then print its audio URL
    Run {
        /// What the story is about
        #[arg(long)]
        prompt: String,

        /// Number of outline beats (overrides pipeline.beat_count)
        #[arg(long)]
        beats: Option<usize>,
    },

    /// List the speech voices available for a language
    Voices {
        /// BCP-47 language code
        #[arg(long, default_value = "en-US")]
        language: String,
    },

    /// Show a task from the configured database
    Status {
        /// Task id
        id: i64,
    },
}
