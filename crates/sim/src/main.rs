//! Headless harness for the crawl engine.
//!
//! Autoplays seeded runs against a content pack and validates content.
//! Run with: `cargo run -p crawl-sim -- <command>`

mod autoplay;
mod commands;
mod content;

use anyhow::Result;
use clap::Parser;
use commands::{Run, Validate};

/// Headless harness for the crawl engine
#[derive(Parser)]
#[command(name = "crawl-sim")]
#[command(about = "Autoplay and content tools for the crawl engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Autoplay one or more seeded runs
    Run(Run),

    /// Load and cross-check a content pack
    Validate(Validate),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
    }
}
