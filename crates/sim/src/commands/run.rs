//! Autoplay seeded runs and report how they ended.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use crate::autoplay::{self, RunOutcome, RunReport};
use crate::content;

/// Autoplay seeded runs
#[derive(Debug, Parser)]
pub struct Run {
    /// Seed of the first run
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Number of consecutive seeds to play
    #[arg(short = 'n', long, default_value_t = 1)]
    runs: u64,

    /// Maximum accepted actions per run
    #[arg(long, default_value_t = 500)]
    steps: u64,

    /// Content pack directory (defaults to the embedded pack)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// One block per run
    Summary,
    /// Summary followed by the run's event log
    Log,
    /// One JSON object per line
    Json,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let (catalog, config) = content::load(self.data_dir.as_ref())?;

        let mut victories = 0;
        for seed in self.seed..self.seed.saturating_add(self.runs) {
            let report = autoplay::simulate(seed, &catalog, &config, self.steps)
                .with_context(|| format!("Failed to start run with seed {seed}"))?;
            if report.outcome == RunOutcome::Victory {
                victories += 1;
            }

            match self.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string(&report)?);
                }
                OutputFormat::Summary => print_summary(&report),
                OutputFormat::Log => {
                    print_summary(&report);
                    for line in &report.log {
                        println!("  {}", style(line).dim());
                    }
                    println!();
                }
            }
        }

        if self.runs > 1 && !matches!(self.format, OutputFormat::Json) {
            println!(
                "{} {victories}/{} runs won",
                style("Total:").bold().green(),
                self.runs
            );
        }
        Ok(())
    }
}

fn print_summary(report: &RunReport) {
    let outcome = match &report.outcome {
        RunOutcome::Victory => style("victory".to_string()).green().bold(),
        RunOutcome::Defeat => style("defeat".to_string()).red().bold(),
        RunOutcome::Unfinished => style("unfinished".to_string()).yellow(),
        RunOutcome::Stalled { action, reason } => {
            style(format!("stalled on {action}: {reason}")).red()
        }
    };

    println!("{} {} {}", style("Seed").bold().cyan(), report.seed, outcome);
    println!(
        "  level {}  actions {}  gold {}  xp {}",
        report.level, report.actions, report.gold, report.experience
    );
    for member in &report.party {
        println!(
            "  {:<10} hp {:>3}/{:<3} atk {:>2} mag {:>2}",
            member.name, member.hp, member.max_hp, member.atk, member.mag
        );
    }
    if !report.inventory.is_empty() {
        println!("  inventory: {}", report.inventory.join(", "));
    }
    println!("  {} {}", style("root").dim(), report.state_root);
}
