//! Content table loaders.
//!
//! Every table is a JSON object keyed by record id. Level tables are keyed
//! by level number.

use std::collections::BTreeMap;
use std::path::Path;

use crawl_core::{
    AllyTemplate, BossDefinition, CardDefinition, Catalog, EnemyTemplate, ItemDefinition,
    LevelTable,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// File names of the content tables inside a data directory.
pub const ENEMIES_FILE: &str = "enemies.json";
pub const CARDS_FILE: &str = "cards.json";
pub const BOSSES_FILE: &str = "bosses.json";
pub const LEVELS_FILE: &str = "levels.json";
pub const ITEMS_FILE: &str = "items.json";
pub const ALLIES_FILE: &str = "allies.json";

/// Raw JSON text of every content table.
#[derive(Clone, Copy, Debug)]
pub struct CatalogSources<'a> {
    pub enemies: &'a str,
    pub cards: &'a str,
    pub bosses: &'a str,
    pub levels: &'a str,
    pub items: &'a str,
    pub allies: &'a str,
}

/// Loader for the content catalog from JSON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load every table from `data_dir` into one catalog.
    pub fn load(data_dir: &Path) -> LoadResult<Catalog> {
        let enemies = read_file(&data_dir.join(ENEMIES_FILE))?;
        let cards = read_file(&data_dir.join(CARDS_FILE))?;
        let bosses = read_file(&data_dir.join(BOSSES_FILE))?;
        let levels = read_file(&data_dir.join(LEVELS_FILE))?;
        let items = read_file(&data_dir.join(ITEMS_FILE))?;
        let allies = read_file(&data_dir.join(ALLIES_FILE))?;

        Self::parse(CatalogSources {
            enemies: &enemies,
            cards: &cards,
            bosses: &bosses,
            levels: &levels,
            items: &items,
            allies: &allies,
        })
    }

    /// Parse every table from in-memory JSON text.
    pub fn parse(sources: CatalogSources<'_>) -> LoadResult<Catalog> {
        let catalog = Catalog {
            enemies: Self::parse_enemies(sources.enemies)?,
            cards: Self::parse_cards(sources.cards)?,
            bosses: Self::parse_bosses(sources.bosses)?,
            levels: Self::parse_levels(sources.levels)?,
            items: Self::parse_items(sources.items)?,
            allies: Self::parse_allies(sources.allies)?,
        };
        debug!(
            enemies = catalog.enemies.len(),
            cards = catalog.cards.len(),
            bosses = catalog.bosses.len(),
            levels = catalog.levels.len(),
            items = catalog.items.len(),
            allies = catalog.allies.len(),
            "content catalog parsed"
        );
        Ok(catalog)
    }

    pub fn parse_enemies(content: &str) -> LoadResult<BTreeMap<String, EnemyTemplate>> {
        parse_table(content, "enemy")
    }

    /// Unknown effect kinds load as inert cards.
    pub fn parse_cards(content: &str) -> LoadResult<BTreeMap<String, CardDefinition>> {
        parse_table(content, "card")
    }

    pub fn parse_bosses(content: &str) -> LoadResult<BTreeMap<String, BossDefinition>> {
        parse_table(content, "boss")
    }

    pub fn parse_levels(content: &str) -> LoadResult<BTreeMap<u32, LevelTable>> {
        parse_table(content, "level")
    }

    pub fn parse_items(content: &str) -> LoadResult<BTreeMap<String, ItemDefinition>> {
        parse_table(content, "item")
    }

    pub fn parse_allies(content: &str) -> LoadResult<BTreeMap<String, AllyTemplate>> {
        parse_table(content, "ally")
    }
}

fn parse_table<K, V>(content: &str, what: &str) -> LoadResult<BTreeMap<K, V>>
where
    K: Ord + DeserializeOwned,
    V: DeserializeOwned,
{
    serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} table JSON: {}", what, e))
}
