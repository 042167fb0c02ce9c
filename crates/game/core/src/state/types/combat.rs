//! Combat state for the 1v1 turn machine.

use bitflags::bitflags;

use super::Position;
use crate::env::EnemyTemplate;

/// Mutable copy of an enemy template for one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySnapshot {
    /// Template id the snapshot was taken from.
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub mag: u32,
    pub gold: u32,
    pub experience: u32,
}

impl EnemySnapshot {
    pub fn from_template(id: impl Into<String>, template: &EnemyTemplate) -> Self {
        Self {
            id: id.into(),
            name: template.name.clone(),
            hp: template.hp,
            max_hp: template.hp,
            atk: template.atk,
            mag: template.mag,
            gold: template.gold,
            experience: template.experience,
        }
    }
}

/// Whose turn it is in an active combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Turn {
    #[default]
    Player,
    Enemy,
}

bitflags! {
    /// One-shot combat modifiers set by cards and consumed by the enemy turn.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u8 {
        /// Enemy skips its next turn.
        const STUNNED    = 1 << 0;
        /// Next enemy attack is negated.
        const DODGE_NEXT = 1 << 1;
        /// Next enemy hit is halved, rounded up.
        const DEFENDING  = 1 << 2;
    }
}

/// Status modifiers active in the current combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStatus {
    pub flags: StatusFlags,
    /// Flat reduction applied once to the next enemy hit.
    pub damage_reduction: u32,
}

impl CombatStatus {
    pub fn stunned(&self) -> bool {
        self.flags.contains(StatusFlags::STUNNED)
    }

    pub fn dodge_next(&self) -> bool {
        self.flags.contains(StatusFlags::DODGE_NEXT)
    }

    pub fn defending(&self) -> bool {
        self.flags.contains(StatusFlags::DEFENDING)
    }
}

/// Boss phase a combat belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossPhaseRef {
    pub phase: usize,
    pub enemy_index: usize,
}

/// Active 1v1 combat. Present in the game state only while combat is active.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub enemy: EnemySnapshot,
    /// Mirror of the acting leader's HP.
    pub player_hp: u32,
    pub turn: Turn,
    pub status: CombatStatus,
    /// Tile the combat was started from.
    pub origin: Position,
    pub boss_phase: Option<BossPhaseRef>,
}

impl CombatState {
    pub fn new(enemy: EnemySnapshot, player_hp: u32, origin: Position) -> Self {
        Self {
            enemy,
            player_hp,
            turn: Turn::Player,
            status: CombatStatus::default(),
            origin,
            boss_phase: None,
        }
    }

    pub fn with_boss_phase(mut self, phase: BossPhaseRef) -> Self {
        self.boss_phase = Some(phase);
        self
    }

    pub fn enemy_hp(&self) -> u32 {
        self.enemy.hp
    }

    pub fn is_boss_combat(&self) -> bool {
        self.boss_phase.is_some()
    }
}
