use std::collections::BTreeMap;

use crate::state::TileKind;

/// Read-only lookup of per-level generation tables.
pub trait LevelOracle: Send + Sync {
    /// Table for the level, or `None` to use the built-in defaults.
    fn level_table(&self, level: u32) -> Option<LevelTable>;
}

/// Encounter weights in enumeration (tile-kind) order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<TileKind, u32>", into = "BTreeMap<TileKind, u32>")
)]
pub struct EncounterWeights(Vec<(TileKind, u32)>);

impl EncounterWeights {
    pub fn entries(&self) -> &[(TileKind, u32)] {
        &self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, weight)| u64::from(*weight)).sum()
    }

    /// Entries generation may draw from. Structural kinds are placed by the
    /// generator itself, so their weights are ignored.
    pub fn drawable(&self) -> impl Iterator<Item = (TileKind, u32)> + '_ {
        self.0
            .iter()
            .copied()
            .filter(|(kind, _)| !kind.is_structural())
    }

    /// Sum of the drawable weights.
    pub fn drawable_total(&self) -> u64 {
        self.drawable().map(|(_, weight)| u64::from(weight)).sum()
    }
}

impl Default for EncounterWeights {
    /// Built-in distribution used when a level supplies no table.
    fn default() -> Self {
        Self(vec![
            (TileKind::Fight, 35),
            (TileKind::Hazard, 15),
            (TileKind::Item, 20),
            (TileKind::Ally, 10),
            (TileKind::Empty, 20),
        ])
    }
}

impl From<BTreeMap<TileKind, u32>> for EncounterWeights {
    fn from(map: BTreeMap<TileKind, u32>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl From<EncounterWeights> for BTreeMap<TileKind, u32> {
    fn from(weights: EncounterWeights) -> Self {
        weights.0.into_iter().collect()
    }
}

/// Enemy ids drawn for fight tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyPools {
    pub common: Vec<String>,
    pub rare: Vec<String>,
}

impl EnemyPools {
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.rare.is_empty()
    }
}

/// Generation and encounter table for one level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelTable {
    pub encounter_weights: EncounterWeights,
    pub enemy_pools: EnemyPools,
    /// Equipment ids that item tiles may yield; empty means every item.
    pub items: Vec<String>,
    /// Ally ids that ally tiles may yield; empty means every ally.
    pub allies: Vec<String>,
}

impl LevelTable {
    pub fn with_weights(mut self, weights: &[(TileKind, u32)]) -> Self {
        self.encounter_weights = EncounterWeights(weights.to_vec());
        self
    }

    pub fn with_enemies(mut self, common: &[&str], rare: &[&str]) -> Self {
        self.enemy_pools = EnemyPools {
            common: common.iter().map(|id| id.to_string()).collect(),
            rare: rare.iter().map(|id| id.to_string()).collect(),
        };
        self
    }
}
