//! Ticklist - local task list with a deletion history
//!
//! This is the main entry point for the Ticklist command-line application.
//! It initializes logging and reports errors to stderr.

use clap::Parser;
use std::process;
use ticklist::cli::{self, Cli};
use ticklist::error::Result;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    let config = cli::load_config(&cli);

    // RUST_LOG wins; otherwise use the configured level
    let level = config
        .as_ref()
        .map(|config| config.logging.level.clone())
        .unwrap_or_else(|_| "warn".to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config.and_then(|config| run(cli, config)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, config: ticklist::Config) -> Result<()> {
    cli::run(cli, config)
}
