//! Game configuration loader.

use std::path::Path;

use crawl_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Omitted keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)?;
        if !config.entry.in_bounds() {
            anyhow::bail!("entry {} lies outside the grid", config.entry);
        }
        if config.opening_hand > GameConfig::HAND_CAP {
            anyhow::bail!(
                "opening_hand {} exceeds the hand capacity of {}",
                config.opening_hand,
                GameConfig::HAND_CAP
            );
        }
        Ok(config)
    }
}
