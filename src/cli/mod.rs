// src/cli/mod.rs
use clap::Parser;

pub mod commands;
pub mod handlers;
pub mod menu;

pub use commands::{ClassArgs, CliCommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Random password generator with a scrambled reveal", long_about = None)]
pub struct Args {
    /// Command to execute (interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Milliseconds between reveal frames
    #[arg(long, env = "REVEAL_INTERVAL_MS", global = true)]
    pub interval_ms: Option<u64>,

    /// Log file (logs go to stderr when unset)
    #[arg(long, env = "LOG_FILE", global = true)]
    pub log_file: Option<std::path::PathBuf>,
}
