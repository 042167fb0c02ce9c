//! In-memory content catalog.
//!
//! [`Catalog`] owns every content table as sorted maps and implements all
//! oracle traits, so a single value can back a whole [`GameEnv`]. Loaders in
//! `crawl-content` fill it from JSON; tests build it in code.

use std::collections::BTreeMap;

use super::{
    AllyOracle, AllyTemplate, BossDefinition, BossOracle, CardDefinition, CardOracle, EnemyOracle,
    EnemyTemplate, Env, GameEnv, ItemDefinition, ItemOracle, LevelOracle, LevelTable,
};

/// Complete set of static content for a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Catalog {
    pub enemies: BTreeMap<String, EnemyTemplate>,
    pub cards: BTreeMap<String, CardDefinition>,
    pub bosses: BTreeMap<String, BossDefinition>,
    pub levels: BTreeMap<u32, LevelTable>,
    pub items: BTreeMap<String, ItemDefinition>,
    pub allies: BTreeMap<String, AllyTemplate>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enemy(mut self, id: impl Into<String>, enemy: EnemyTemplate) -> Self {
        self.enemies.insert(id.into(), enemy);
        self
    }

    pub fn with_card(mut self, id: impl Into<String>, card: CardDefinition) -> Self {
        self.cards.insert(id.into(), card);
        self
    }

    pub fn with_boss(mut self, id: impl Into<String>, boss: BossDefinition) -> Self {
        self.bosses.insert(id.into(), boss);
        self
    }

    pub fn with_level(mut self, level: u32, table: LevelTable) -> Self {
        self.levels.insert(level, table);
        self
    }

    pub fn with_item(mut self, id: impl Into<String>, item: ItemDefinition) -> Self {
        self.items.insert(id.into(), item);
        self
    }

    pub fn with_ally(mut self, id: impl Into<String>, ally: AllyTemplate) -> Self {
        self.allies.insert(id.into(), ally);
        self
    }

    /// Borrows the catalog as a fully populated environment.
    pub fn as_env(&self) -> GameEnv<'_> {
        Env::with_all(self, self, self, self, self, self).into_game_env()
    }
}

impl EnemyOracle for Catalog {
    fn enemy(&self, id: &str) -> Option<EnemyTemplate> {
        self.enemies.get(id).cloned()
    }

    fn enemy_ids(&self) -> Vec<String> {
        self.enemies.keys().cloned().collect()
    }
}

impl CardOracle for Catalog {
    fn card(&self, id: &str) -> Option<CardDefinition> {
        self.cards.get(id).cloned()
    }
}

impl BossOracle for Catalog {
    fn boss(&self, id: &str) -> Option<BossDefinition> {
        self.bosses.get(id).cloned()
    }

    fn boss_for_level(&self, level: u32) -> Option<String> {
        self.bosses
            .iter()
            .find(|(_, boss)| boss.unlock_level == level)
            .map(|(id, _)| id.clone())
    }
}

impl LevelOracle for Catalog {
    fn level_table(&self, level: u32) -> Option<LevelTable> {
        self.levels.get(&level).cloned()
    }
}

impl ItemOracle for Catalog {
    fn item(&self, id: &str) -> Option<ItemDefinition> {
        self.items.get(id).cloned()
    }

    fn item_ids(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }
}

impl AllyOracle for Catalog {
    fn ally(&self, id: &str) -> Option<AllyTemplate> {
        self.allies.get(id).cloned()
    }

    fn ally_ids(&self) -> Vec<String> {
        self.allies.keys().cloned().collect()
    }
}
