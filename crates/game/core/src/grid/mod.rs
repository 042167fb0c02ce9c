//! Level generation.
//!
//! A level is a 4×4 board. Regular levels draw every non-entry tile from the
//! level's encounter weights, then force exactly one key and one door. Boss
//! levels are empty apart from the entrance and the boss tile.

pub mod fog;

pub use fog::{explore, reveal_adjacent, reveal_hidden};

use tracing::debug;

use crate::config::GameConfig;
use crate::env::LevelTable;
use crate::rng::RngStream;
use crate::state::{Board, Position, TileKind};

/// Generates a regular level with the entrance at `entry`.
///
/// Draw order is fixed: one weighted draw per non-entry tile in row-major
/// order, then the key slot over the 15 non-entry indices, then the door
/// slot over the 14 remaining ones. The entry is explored and its
/// neighbours discovered.
pub fn generate_level(rng: &mut RngStream, level: u32, entry: Position, table: &LevelTable) -> Board {
    let entry_index = entry.index().unwrap_or_default();
    let weights: Vec<(TileKind, u32)> = table.encounter_weights.drawable().collect();

    let mut kinds = [TileKind::Empty; GameConfig::TILE_COUNT];
    for (index, kind) in kinds.iter_mut().enumerate() {
        *kind = if index == entry_index {
            TileKind::Start
        } else {
            rng.weighted_pick(&weights).unwrap_or(TileKind::Empty)
        };
    }

    let mut open: Vec<usize> = (0..GameConfig::TILE_COUNT)
        .filter(|index| *index != entry_index)
        .collect();
    let key_index = open.remove(rng.next_int(0, (open.len() - 1) as u32) as usize);
    let door_index = open[rng.next_int(0, (open.len() - 1) as u32) as usize];
    kinds[key_index] = TileKind::Key;
    kinds[door_index] = TileKind::Door;

    debug!(level, key_index, door_index, "generated level layout");

    let mut board = Board::from_kinds(level, entry, kinds);
    explore(&mut board, entry);
    reveal_adjacent(&mut board, entry);
    board
}

/// Boss tile index for a given entrance: the configured index, or the
/// opposite corner when the entrance already occupies it.
pub fn boss_tile_index(config: &GameConfig, entry: Position) -> usize {
    let reserved = config.boss_tile_index.min(GameConfig::TILE_COUNT - 1);
    match entry.index() {
        Some(index) if index == reserved && reserved == 0 => GameConfig::TILE_COUNT - 1,
        Some(index) if index == reserved => 0,
        _ => reserved,
    }
}

/// Generates a boss level: entrance, one `BossEncounter` tile carrying
/// `boss_id`, empty tiles elsewhere. Consumes no randomness.
pub fn generate_boss_level(level: u32, entry: Position, boss_id: &str, boss_index: usize) -> Board {
    let entry_index = entry.index().unwrap_or_default();
    let mut kinds = [TileKind::Empty; GameConfig::TILE_COUNT];
    kinds[boss_index] = TileKind::BossEncounter;
    kinds[entry_index] = TileKind::Start;

    let mut board = Board::from_kinds(level, entry, kinds);
    if let Some(tile) = board.tile_mut(Position::from_index(boss_index)) {
        tile.boss_id = Some(boss_id.to_string());
    }
    explore(&mut board, entry);
    reveal_adjacent(&mut board, entry);
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_has_one_key_and_one_door_off_the_entry() {
        let entry = Position::new(1, 0);
        for seed in 0..200 {
            let mut rng = RngStream::new(seed);
            let board = generate_level(&mut rng, 1, entry, &LevelTable::default());
            assert_eq!(board.count_kind(TileKind::Key), 1, "seed {seed}");
            assert_eq!(board.count_kind(TileKind::Door), 1, "seed {seed}");
            assert_eq!(board.count_kind(TileKind::Start), 1, "seed {seed}");
            assert_eq!(board.tile(entry).unwrap().kind, TileKind::Start);
        }
    }

    #[test]
    fn entry_is_explored_and_neighbors_discovered() {
        let entry = Position::new(1, 0);
        let mut rng = RngStream::new(12345);
        let board = generate_level(&mut rng, 1, entry, &LevelTable::default());

        assert!(board.tile(entry).unwrap().explored());
        for neighbor in entry.neighbors() {
            assert!(board.tile(neighbor).unwrap().discovered());
        }
        assert!(!board.tile(Position::new(3, 3)).unwrap().discovered());
    }

    #[test]
    fn structural_weights_are_ignored() {
        let table = LevelTable::default().with_weights(&[(TileKind::Key, 50), (TileKind::Hazard, 1)]);
        let mut rng = RngStream::new(3);
        let board = generate_level(&mut rng, 2, Position::new(0, 0), &table);
        assert_eq!(board.count_kind(TileKind::Key), 1);
        assert_eq!(board.count_kind(TileKind::Hazard), GameConfig::TILE_COUNT - 3);
    }

    #[test]
    fn oversized_weights_still_generate() {
        let table = LevelTable::default().with_weights(&[
            (TileKind::Fight, 3_000_000_000),
            (TileKind::Item, 3_000_000_000),
        ]);
        let mut rng = RngStream::new(12345);
        let board = generate_level(&mut rng, 1, Position::new(1, 0), &table);
        let drawn = board.count_kind(TileKind::Fight) + board.count_kind(TileKind::Item);
        assert_eq!(drawn, GameConfig::TILE_COUNT - 3);
    }

    #[test]
    fn boss_level_is_fog_gated() {
        let entry = Position::new(1, 0);
        let board = generate_boss_level(3, entry, "lich", 15);
        let boss = board.tile(Position::from_index(15)).unwrap();
        assert_eq!(boss.kind, TileKind::BossEncounter);
        assert_eq!(boss.boss_id.as_deref(), Some("lich"));
        assert!(!boss.discovered());
        assert_eq!(board.count_kind(TileKind::Empty), GameConfig::TILE_COUNT - 2);
    }

    #[test]
    fn boss_tile_moves_when_entry_occupies_it() {
        let config = GameConfig::default();
        assert_eq!(boss_tile_index(&config, Position::new(1, 0)), 15);
        assert_eq!(boss_tile_index(&config, Position::new(3, 3)), 0);
    }
}
