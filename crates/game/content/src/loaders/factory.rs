//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use crawl_core::{Catalog, GameConfig};

use crate::loaders::catalog::CatalogSources;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Default content pack compiled into the crate.
const EMBEDDED: CatalogSources<'static> = CatalogSources {
    enemies: include_str!("../../data/enemies.json"),
    cards: include_str!("../../data/cards.json"),
    bosses: include_str!("../../data/bosses.json"),
    levels: include_str!("../../data/levels.json"),
    items: include_str!("../../data/items.json"),
    allies: include_str!("../../data/allies.json"),
};

const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── enemies.json
/// ├── cards.json
/// ├── bosses.json
/// ├── levels.json
/// ├── items.json
/// └── allies.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load every content table.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load(&self.data_dir)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The content pack shipped with the crate.
    pub fn embedded_catalog() -> LoadResult<Catalog> {
        CatalogLoader::parse(EMBEDDED)
    }

    /// The configuration shipped with the crate.
    pub fn embedded_config() -> LoadResult<GameConfig> {
        ConfigLoader::parse(EMBEDDED_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_content;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn embedded_pack_is_consistent() {
        let catalog = ContentFactory::embedded_catalog().unwrap();
        let config = ContentFactory::embedded_config().unwrap();
        assert!(validate_content(&catalog, &config).is_empty());
    }

    #[test]
    fn loads_pack_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), EMBEDDED_CONFIG).unwrap();
        for (name, content) in [
            ("enemies.json", EMBEDDED.enemies),
            ("cards.json", EMBEDDED.cards),
            ("bosses.json", EMBEDDED.bosses),
            ("levels.json", EMBEDDED.levels),
            ("items.json", EMBEDDED.items),
            ("allies.json", EMBEDDED.allies),
        ] {
            std::fs::write(dir.path().join(name), content).unwrap();
        }

        let factory = ContentFactory::new(dir.path());
        assert_eq!(
            factory.load_catalog().unwrap(),
            ContentFactory::embedded_catalog().unwrap()
        );
        assert_eq!(
            factory.load_config().unwrap(),
            ContentFactory::embedded_config().unwrap()
        );
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(error.to_string().contains("enemies.json"));
    }
}
