pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedpack")]
#[command(about = "Poll RSS/Atom feeds and pack new items into digests", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/feedpack/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Exit non-zero when any source or the forward step failed
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch new items, write a digest and forward it to the writer API
    Digest,
    /// Fetch new items with full article text and push them to the table store
    Research,
    /// Run a job repeatedly until interrupted
    Watch {
        /// Run interval (e.g., "30m", "6h", "1d")
        #[arg(short, long, default_value = "6h")]
        interval: String,

        /// Run the research job instead of the digest
        #[arg(long)]
        research: bool,

        /// Skip the run on start
        #[arg(long)]
        no_initial_run: bool,
    },
    /// List configured sources and their failure counters
    Sources {
        /// Show the research job's sources
        #[arg(long)]
        research: bool,
    },
}
