//! Cross-table consistency checks.
//!
//! Loaders only check that each file parses. These checks catch dangling
//! references between tables, which would otherwise surface mid-run as
//! oracle errors.

use crawl_core::env::BossPhase;
use crawl_core::{Catalog, GameConfig};

/// A dangling or unusable reference in the content pack.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentIssue {
    #[error("starting deck names unknown card '{0}'")]
    UnknownStartingCard(String),

    #[error("level {level} pool names unknown enemy '{enemy}'")]
    UnknownPoolEnemy { level: u32, enemy: String },

    #[error("level {level} lists unknown item '{item}'")]
    UnknownLevelItem { level: u32, item: String },

    #[error("level {level} lists unknown ally '{ally}'")]
    UnknownLevelAlly { level: u32, ally: String },

    #[error("boss '{boss}' phase {phase} names unknown enemy '{enemy}'")]
    UnknownBossEnemy {
        boss: String,
        phase: usize,
        enemy: String,
    },

    #[error("bosses '{first}' and '{second}' both unlock at level {level}")]
    DuplicateBossLevel {
        level: u32,
        first: String,
        second: String,
    },

    #[error("ally '{ally}' grants unknown card '{card}'")]
    UnknownAllyCard { ally: String, card: String },

    #[error("level {0} has no positive weight on a drawable tile kind")]
    EmptyWeights(u32),

    #[error("level {level} encounter weights sum to {total}, above {}", u32::MAX)]
    OversizedWeights { level: u32, total: u64 },

    #[error("no enemies are defined")]
    NoEnemies,
}

/// Returns every consistency issue found; an empty list means the pack is
/// usable with `config`.
pub fn validate_content(catalog: &Catalog, config: &GameConfig) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    if catalog.enemies.is_empty() {
        issues.push(ContentIssue::NoEnemies);
    }

    for card in &config.starting_deck {
        if !catalog.cards.contains_key(card) {
            issues.push(ContentIssue::UnknownStartingCard(card.clone()));
        }
    }

    for (&level, table) in &catalog.levels {
        let total = table.encounter_weights.drawable_total();
        if total == 0 {
            issues.push(ContentIssue::EmptyWeights(level));
        } else if total > u64::from(u32::MAX) {
            issues.push(ContentIssue::OversizedWeights { level, total });
        }
        let pools = &table.enemy_pools;
        for enemy in pools.common.iter().chain(&pools.rare) {
            if !catalog.enemies.contains_key(enemy) {
                issues.push(ContentIssue::UnknownPoolEnemy {
                    level,
                    enemy: enemy.clone(),
                });
            }
        }
        for item in &table.items {
            if !catalog.items.contains_key(item) {
                issues.push(ContentIssue::UnknownLevelItem {
                    level,
                    item: item.clone(),
                });
            }
        }
        for ally in &table.allies {
            if !catalog.allies.contains_key(ally) {
                issues.push(ContentIssue::UnknownLevelAlly {
                    level,
                    ally: ally.clone(),
                });
            }
        }
    }

    let mut unlocks: Vec<(u32, &String)> = Vec::new();
    for (id, boss) in &catalog.bosses {
        if let Some((_, first)) = unlocks.iter().find(|(level, _)| *level == boss.unlock_level) {
            issues.push(ContentIssue::DuplicateBossLevel {
                level: boss.unlock_level,
                first: (*first).clone(),
                second: id.clone(),
            });
        }
        unlocks.push((boss.unlock_level, id));

        for (phase, definition) in boss.phases.iter().enumerate() {
            let enemies: Vec<&String> = match definition {
                BossPhase::Fight { enemies, .. } => enemies.iter().collect(),
                BossPhase::BossFight { enemy } => vec![enemy],
                BossPhase::Hazard { .. } | BossPhase::Choice => Vec::new(),
            };
            for enemy in enemies {
                if !catalog.enemies.contains_key(enemy) {
                    issues.push(ContentIssue::UnknownBossEnemy {
                        boss: id.clone(),
                        phase,
                        enemy: enemy.clone(),
                    });
                }
            }
        }
    }

    for (id, ally) in &catalog.allies {
        let Some(card) = &ally.card else {
            continue;
        };
        if !catalog.cards.contains_key(card) {
            issues.push(ContentIssue::UnknownAllyCard {
                ally: id.clone(),
                card: card.clone(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawl_core::env::BossDefinition;
    use crawl_core::{AllyTemplate, EnemyTemplate, LevelTable, TileKind};

    fn config() -> GameConfig {
        GameConfig {
            starting_deck: Vec::new(),
            ..GameConfig::default()
        }
    }

    #[test]
    fn empty_catalog_reports_missing_enemies() {
        assert_eq!(
            validate_content(&Catalog::new(), &config()),
            vec![ContentIssue::NoEnemies]
        );
    }

    #[test]
    fn reports_dangling_references() {
        let catalog = Catalog::new()
            .with_enemy("rat", EnemyTemplate::new("Rat", 4, 1))
            .with_level(1, LevelTable::default().with_enemies(&["rat"], &["dragon"]))
            .with_boss(
                "lich",
                BossDefinition::new("Lich", 3, vec![BossPhase::BossFight {
                    enemy: "lich".to_string(),
                }]),
            )
            .with_ally("page", AllyTemplate::new("Page", 8, 1, 0).with_card("banner"));
        let config = GameConfig {
            starting_deck: vec!["strike".to_string()],
            ..GameConfig::default()
        };

        let issues = validate_content(&catalog, &config);
        assert!(issues.contains(&ContentIssue::UnknownStartingCard("strike".to_string())));
        assert!(issues.contains(&ContentIssue::UnknownPoolEnemy {
            level: 1,
            enemy: "dragon".to_string(),
        }));
        assert!(issues.contains(&ContentIssue::UnknownBossEnemy {
            boss: "lich".to_string(),
            phase: 0,
            enemy: "lich".to_string(),
        }));
        assert!(issues.contains(&ContentIssue::UnknownAllyCard {
            ally: "page".to_string(),
            card: "banner".to_string(),
        }));
    }

    #[test]
    fn two_bosses_on_one_level_are_flagged() {
        let catalog = Catalog::new()
            .with_enemy("rat", EnemyTemplate::new("Rat", 4, 1))
            .with_boss("a", BossDefinition::new("A", 2, Vec::new()))
            .with_boss("b", BossDefinition::new("B", 2, Vec::new()));
        let issues = validate_content(&catalog, &config());
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], ContentIssue::DuplicateBossLevel { level: 2, .. }));
    }

    #[test]
    fn structural_only_weights_count_as_empty() {
        let catalog = Catalog::new()
            .with_enemy("rat", EnemyTemplate::new("Rat", 4, 1))
            .with_level(
                2,
                LevelTable::default().with_weights(&[(TileKind::Key, 10), (TileKind::Door, 10)]),
            );
        assert_eq!(
            validate_content(&catalog, &config()),
            vec![ContentIssue::EmptyWeights(2)]
        );
    }

    #[test]
    fn weight_totals_beyond_u32_are_flagged() {
        let catalog = Catalog::new()
            .with_enemy("rat", EnemyTemplate::new("Rat", 4, 1))
            .with_level(
                1,
                LevelTable::default()
                    .with_weights(&[(TileKind::Fight, u32::MAX), (TileKind::Empty, u32::MAX)]),
            );
        assert_eq!(
            validate_content(&catalog, &config()),
            vec![ContentIssue::OversizedWeights {
                level: 1,
                total: 2 * u64::from(u32::MAX),
            }]
        );
    }
}
