use std::path::PathBuf;

use clap::Parser;

/// Cardstack: drive a card stack through a script of accepts and rejects
/// on a virtual clock.
#[derive(Parser, Debug)]
#[command(name = "cardstack", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. `cardstack=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Number of items in the stack.
    #[arg(short = 'n', long, default_value_t = 5)]
    pub items: u32,

    /// Steps to run: `a` accept, `r` reject, `s` restart.
    #[arg(short = 's', long, default_value = "aaaaa")]
    pub script: String,

    /// Simulated duration of the outgoing item's exit transition, in ms.
    #[arg(long, default_value_t = 400)]
    pub exit_ms: u64,

    /// Never report exit transitions; only the exit timeout ends an advance.
    #[arg(long)]
    pub drop_signals: bool,

    /// Print the final stack state and surface as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
