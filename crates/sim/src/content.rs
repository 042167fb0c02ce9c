//! Content pack selection shared by the commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use crawl_content::ContentFactory;
use crawl_core::{Catalog, GameConfig};
use tracing::info;

/// Loads the pack from `data_dir`, or the embedded pack when none is given.
pub fn load(data_dir: Option<&PathBuf>) -> Result<(Catalog, GameConfig)> {
    match data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let catalog = factory
                .load_catalog()
                .with_context(|| format!("Failed to load content from {}", dir.display()))?;
            let config = factory
                .load_config()
                .with_context(|| format!("Failed to load config from {}", dir.display()))?;
            info!(dir = %dir.display(), "loaded content pack");
            Ok((catalog, config))
        }
        None => {
            let catalog =
                ContentFactory::embedded_catalog().context("Embedded content is malformed")?;
            let config =
                ContentFactory::embedded_config().context("Embedded config is malformed")?;
            Ok((catalog, config))
        }
    }
}
