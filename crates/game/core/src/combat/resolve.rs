//! State transitions that open and close a combat.

use tracing::info;

use crate::boss;
use crate::env::{GameEnv, OracleError};
use crate::state::{BossPhaseRef, CombatState, EnemySnapshot, GameState, LogKind};

/// How a combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatResolution {
    Victory,
    /// Every party member is down; the run is over.
    Defeat,
}

/// Opens a combat against `enemy` on the player's tile and marks the tile
/// engaged. The player acts first.
pub fn begin_combat(state: &mut GameState, enemy: EnemySnapshot, boss_phase: Option<BossPhaseRef>) {
    let origin = state.board.player();
    let player_hp = state.party.leader().map_or(0, |leader| leader.hp);

    state.record(
        LogKind::Combat,
        format!("{} ({} HP) attacks!", enemy.name, enemy.hp),
    );
    info!(enemy = %enemy.id, hp = enemy.hp, %origin, "combat started");

    let mut combat = CombatState::new(enemy, player_hp, origin);
    if let Some(phase) = boss_phase {
        combat = combat.with_boss_phase(phase);
    }
    state.combat = Some(combat);
    state.board.current_tile_mut().engage();
}

/// Closes a won combat: grants the enemy's rewards, then either consumes the
/// origin tile or hands control to the boss machine.
pub fn resolve_victory(state: &mut GameState, env: &GameEnv<'_>) -> Result<CombatResolution, OracleError> {
    let Some(combat) = state.combat.take() else {
        return Ok(CombatResolution::Victory);
    };

    let enemy = combat.enemy;
    state.gold += enemy.gold;
    state.experience += enemy.experience;
    state.record(
        LogKind::Combat,
        format!(
            "{} is defeated (+{} gold, +{} xp).",
            enemy.name, enemy.gold, enemy.experience
        ),
    );
    info!(enemy = %enemy.id, gold = enemy.gold, xp = enemy.experience, "combat won");

    match combat.boss_phase {
        Some(phase) => boss::on_combat_victory(state, env, phase)?,
        None => {
            if let Some(tile) = state.board.tile_mut(combat.origin) {
                tile.consume();
            }
        }
    }

    Ok(CombatResolution::Victory)
}
