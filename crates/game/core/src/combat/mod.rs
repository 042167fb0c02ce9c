//! Combat resolution system.
//!
//! Damage formulas and skill checks are pure functions over already-rolled
//! dice; the action layer draws the dice from the state's RNG and feeds them
//! in. [`resolve`] holds the state transitions shared by every path that can
//! end a fight (attacks, cards, enemy turns, flee).
//!
//! # Core Functions
//!
//! - `attack_damage`: player hit, `max(1, stat + roll - 3)`
//! - `enemy_damage`: enemy hit after shield and defend modifiers
//! - `skill_check`: d20 + modifier against a difficulty, success on `>=`

pub mod check;
pub mod damage;
pub mod resolve;

pub use check::{SkillCheck, skill_check};
pub use damage::{attack_damage, enemy_damage, flee_failure_damage};
pub use resolve::{CombatResolution, begin_combat, resolve_victory};

/// Faces of the damage die.
pub const DAMAGE_DIE: u32 = 6;

/// Faces of the skill-check die.
pub const CHECK_DIE: u32 = 20;
