//! Board tiles and their fog/encounter lifecycle.

use bitflags::bitflags;

use super::{EnemySnapshot, Position};

/// Encounter type of a tile.
///
/// Declaration order is the enumeration order used when sampling encounter
/// weights, so it doubles as the tie-break order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TileKind {
    Start,
    Fight,
    Hazard,
    Item,
    Ally,
    Key,
    Door,
    Empty,
    BossEncounter,
}

impl TileKind {
    /// Kinds placed by the generator rather than drawn from weights.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::Start | Self::Key | Self::Door | Self::BossEncounter)
    }
}

bitflags! {
    /// Fog and resolution flags of a tile.
    ///
    /// Flags are only ever inserted: `EXPLORED` implies `DISCOVERED`,
    /// `CONSUMED` implies `EXPLORED`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        const DISCOVERED = 1 << 0;
        const EXPLORED   = 1 << 1;
        const CONSUMED   = 1 << 2;
    }
}

/// Combat engagement of a tile: `Unengaged → Engaged → Resolved`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Engagement {
    #[default]
    Unengaged,
    /// Combat was started here at least once.
    Engaged,
    /// The encounter on this tile is finished.
    Resolved,
}

/// One cell of the level grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    pub position: Position,
    flags: TileFlags,
    engagement: Engagement,
    /// Boss definition id for `BossEncounter` tiles.
    pub boss_id: Option<String>,
    /// Enemy left behind after a successful flee.
    pub lingering_enemy: Option<EnemySnapshot>,
}

impl Tile {
    pub fn new(kind: TileKind, position: Position) -> Self {
        Self {
            kind,
            position,
            flags: TileFlags::empty(),
            engagement: Engagement::Unengaged,
            boss_id: None,
            lingering_enemy: None,
        }
    }

    pub fn discovered(&self) -> bool {
        self.flags.contains(TileFlags::DISCOVERED)
    }

    pub fn explored(&self) -> bool {
        self.flags.contains(TileFlags::EXPLORED)
    }

    pub fn consumed(&self) -> bool {
        self.flags.contains(TileFlags::CONSUMED)
    }

    pub fn engagement(&self) -> Engagement {
        self.engagement
    }

    /// True once combat has been started on this tile.
    pub fn combat_engaged(&self) -> bool {
        self.engagement != Engagement::Unengaged
    }

    pub fn discover(&mut self) {
        self.flags.insert(TileFlags::DISCOVERED);
    }

    pub fn explore(&mut self) {
        self.flags.insert(TileFlags::DISCOVERED | TileFlags::EXPLORED);
    }

    /// Marks the encounter finished. Consuming implies exploring.
    pub fn consume(&mut self) {
        self.flags
            .insert(TileFlags::DISCOVERED | TileFlags::EXPLORED | TileFlags::CONSUMED);
        self.lingering_enemy = None;
        if self.engagement != Engagement::Unengaged || self.kind == TileKind::Fight {
            self.engagement = Engagement::Resolved;
        }
    }

    /// Records that combat started here. Resolved tiles stay resolved.
    pub fn engage(&mut self) {
        if self.engagement == Engagement::Unengaged {
            self.engagement = Engagement::Engaged;
        }
    }

    /// Tile-completion predicate gating movement away from this tile.
    ///
    /// `Start`/`Empty`/`Door` are always completed. A `Fight` tile is
    /// completed once consumed, or once combat was engaged and is no longer
    /// active. Everything else requires the tile to be consumed.
    pub fn is_completed(&self, combat_active: bool) -> bool {
        match self.kind {
            TileKind::Start | TileKind::Empty | TileKind::Door => true,
            TileKind::Fight => {
                self.consumed() || (self.engagement == Engagement::Engaged && !combat_active)
            }
            _ => self.consumed(),
        }
    }
}
