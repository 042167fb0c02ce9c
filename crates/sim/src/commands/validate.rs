//! Cross-check a content pack before playing it.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use crawl_content::validate_content;

use crate::content;

/// Load and cross-check a content pack
#[derive(Debug, Parser)]
pub struct Validate {
    /// Content pack directory (defaults to the embedded pack)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let (catalog, config) = content::load(self.data_dir.as_ref())?;
        let issues = validate_content(&catalog, &config);

        println!(
            "{} {} enemies, {} cards, {} bosses, {} levels, {} items, {} allies",
            style("Loaded:").bold().cyan(),
            catalog.enemies.len(),
            catalog.cards.len(),
            catalog.bosses.len(),
            catalog.levels.len(),
            catalog.items.len(),
            catalog.allies.len(),
        );

        if issues.is_empty() {
            println!("{}", style("✓ Content is consistent").green().bold());
            return Ok(());
        }

        for issue in &issues {
            eprintln!("  {} {issue}", style("✗").red().bold());
        }
        bail!("{} content issue(s) found", issues.len())
    }
}
