//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Watch two language models play chess against each other in the terminal
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "llm-chess", version, about)]
pub struct Args {
    /// Move service endpoint (POST)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Milliseconds between automatic move requests
    #[arg(short = 'i', long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Timeout for a single move request, in seconds
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Pause between retries of a failed request, in milliseconds
    #[arg(long = "retry-delay-ms", value_name = "MS")]
    pub retry_delay_ms: Option<u64>,

    /// Give up after this many retries (default: retry forever)
    #[arg(long = "max-retries", value_name = "N")]
    pub max_retries: Option<u32>,

    /// Model playing white (service identifier, e.g. gpt-3.5-turbo-instruct)
    #[arg(short = 'w', long, value_name = "MODEL")]
    pub white: Option<String>,

    /// Model playing black
    #[arg(short = 'b', long, value_name = "MODEL")]
    pub black: Option<String>,

    /// Starting position as FEN ("start" for the standard position)
    #[arg(long, value_name = "FEN")]
    pub fen: Option<String>,

    /// Config file (default: <config dir>/llm-chess/config.toml)
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file (default: <data dir>/llm-chess/llm-chess.log)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Start auto-play immediately
    #[arg(short = 's', long)]
    pub start: bool,
}
