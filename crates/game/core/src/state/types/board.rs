use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::{Position, Tile, TileKind};

/// The 4×4 tile grid of the current level plus the player's position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub level: u32,
    tiles: ArrayVec<Tile, { GameConfig::TILE_COUNT }>,
    player: Position,
}

impl Board {
    /// Builds a board from row-major tile kinds.
    ///
    /// Fog is left untouched (all hidden); callers reveal the entry.
    pub fn from_kinds(level: u32, player: Position, kinds: [TileKind; GameConfig::TILE_COUNT]) -> Self {
        let tiles = kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| Tile::new(*kind, Position::from_index(index)))
            .collect();
        Self {
            level,
            tiles,
            player,
        }
    }

    pub fn player(&self) -> Position {
        self.player
    }

    /// Moves the player marker. Position must be in bounds.
    pub(crate) fn set_player(&mut self, position: Position) {
        debug_assert!(position.in_bounds());
        self.player = position;
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        position.index().and_then(|index| self.tiles.get(index))
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        position.index().and_then(|index| self.tiles.get_mut(index))
    }

    pub fn current_tile(&self) -> &Tile {
        // The player position is kept in bounds by construction.
        &self.tiles[self.player.index().unwrap_or_default()]
    }

    pub fn current_tile_mut(&mut self) -> &mut Tile {
        let index = self.player.index().unwrap_or_default();
        &mut self.tiles[index]
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }

    pub fn find_kind(&self, kind: TileKind) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.kind == kind)
    }

    /// Positions not yet discovered, in row-major order.
    pub fn hidden_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .filter(|tile| !tile.discovered())
            .map(|tile| tile.position)
            .collect()
    }
}
