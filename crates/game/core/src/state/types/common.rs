use std::fmt;

use crate::config::GameConfig;

/// Unique identifier of a party member within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberId(pub u32);

impl MemberId {
    /// Identifier reserved for the leader created at run start.
    pub const FOUNDER: Self = Self(0);
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier of a card instance. Never reused within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// Grid position expressed as row/column on the 4×4 board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position of a row-major tile index.
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: index / GameConfig::GRID_SIZE,
            col: index % GameConfig::GRID_SIZE,
        }
    }

    /// Row-major tile index, or `None` when outside the grid.
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.row * GameConfig::GRID_SIZE + self.col)
        } else {
            None
        }
    }

    pub const fn in_bounds(self) -> bool {
        self.row < GameConfig::GRID_SIZE && self.col < GameConfig::GRID_SIZE
    }

    pub const fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub const fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// In-bounds orthogonal neighbours in north, south, west, east order.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
            Some(Position::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(|pos| pos.in_bounds())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Member stat used by skill checks.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stat {
    #[default]
    Atk,
    Mag,
}
