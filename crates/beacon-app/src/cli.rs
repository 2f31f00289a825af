use std::path::PathBuf;

use clap::Parser;

/// Beacon -- terminal chat with the dashboard assistant.
#[derive(Parser, Debug)]
#[command(name = "beacon", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend origin override (beats config and BEACON_API_URL).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log filter directive override (e.g. debug, beacon_chat=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding the persisted history.
    #[arg(long, conflicts_with = "in_memory")]
    pub history_dir: Option<PathBuf>,

    /// Keep history in memory only.
    #[arg(long)]
    pub in_memory: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
