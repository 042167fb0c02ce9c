//! Boss encounter state machine.
//!
//! `Inactive → PhaseRunning(i) → PhaseRunning(i + 1) | Defeated`. Each call
//! to [`run_phase`] dispatches the current phase; fight phases hand over to
//! the combat resolver and come back through [`on_combat_victory`].

use tracing::info;

use crate::combat::{self, CHECK_DIE, SkillCheck, skill_check};
use crate::env::{BossDefinition, BossPhase, GameEnv, OracleError};
use crate::state::{BossPhaseRef, BossState, EnemySnapshot, GameState, LogKind, Stat, TileKind};

/// What starting a phase did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossPhaseEvent {
    /// A fight began against the named enemy.
    CombatStarted { enemy: String },
    /// A hazard phase was rolled; it completes either way.
    HazardResolved { check: SkillCheck, damage: u32 },
    /// The phase had nothing to resolve and completed at once.
    Completed,
}

/// Starts (or resumes) the current phase of the boss on the player's tile.
///
/// The boss activates on first use. Callers verify the player stands on a
/// boss tile with no combat running.
pub fn run_phase(state: &mut GameState, env: &GameEnv<'_>, boss_id: &str) -> Result<BossPhaseEvent, OracleError> {
    let definition = env.boss(boss_id)?;

    let boss = match state.boss.take() {
        Some(boss) if boss.boss_id == boss_id => boss,
        _ => {
            state.record(LogKind::Boss, format!("{} awakens!", definition.name));
            info!(boss = boss_id, phases = definition.phases.len(), "boss activated");
            BossState::new(boss_id)
        }
    };
    let phase_index = boss.current_phase;
    let enemy_index = boss.enemy_index;
    state.boss = Some(BossState {
        phase_complete: false,
        ..boss
    });

    let Some(phase) = definition.phases.get(phase_index).cloned() else {
        defeat(state, &definition);
        return Ok(BossPhaseEvent::Completed);
    };
    state.record(
        LogKind::Boss,
        format!("Phase {} ({}) begins.", phase_index + 1, phase.label()),
    );

    match phase {
        BossPhase::Fight { enemies, .. } => {
            let Some(enemy_id) = enemies.get(enemy_index).or(enemies.last()) else {
                complete_phase(state, &definition);
                return Ok(BossPhaseEvent::Completed);
            };
            let reference = BossPhaseRef {
                phase: phase_index,
                enemy_index,
            };
            start_phase_combat(state, env, enemy_id, reference)?;
            Ok(BossPhaseEvent::CombatStarted {
                enemy: enemy_id.clone(),
            })
        }
        BossPhase::BossFight { enemy } => {
            let reference = BossPhaseRef {
                phase: phase_index,
                enemy_index: 0,
            };
            start_phase_combat(state, env, &enemy, reference)?;
            Ok(BossPhaseEvent::CombatStarted { enemy })
        }
        BossPhase::Hazard {
            difficulty,
            stat,
            damage,
        } => {
            let roll = state.rng.roll_die(CHECK_DIE);
            let modifier = state.party.leader().map_or(0, |leader| match stat {
                Stat::Atk => leader.atk,
                Stat::Mag => leader.mag,
            });
            let check = skill_check(roll, modifier, difficulty);
            let mut dealt = 0;
            if check.passed {
                state.record(
                    LogKind::Boss,
                    format!("The party overcomes the trial ({} vs {difficulty}).", check.total),
                );
            } else {
                dealt = state.damage_leader(damage).dealt;
                state.record(
                    LogKind::Boss,
                    format!("The trial wounds the leader for {dealt} ({} vs {difficulty}).", check.total),
                );
            }
            if !state.over {
                complete_phase(state, &definition);
            }
            Ok(BossPhaseEvent::HazardResolved {
                check,
                damage: dealt,
            })
        }
        BossPhase::Choice => {
            complete_phase(state, &definition);
            Ok(BossPhaseEvent::Completed)
        }
    }
}

fn start_phase_combat(
    state: &mut GameState,
    env: &GameEnv<'_>,
    enemy_id: &str,
    reference: BossPhaseRef,
) -> Result<(), OracleError> {
    let template = env.enemy(enemy_id)?;
    combat::begin_combat(
        state,
        EnemySnapshot::from_template(enemy_id, &template),
        Some(reference),
    );
    Ok(())
}

/// Routes a won boss-phase combat.
///
/// Single-enemy phases and the last enemy of a multi-enemy phase consume
/// the boss tile and complete the phase. Otherwise the enemy index advances:
/// sequential phases wait for the player to start the phase again, the
/// others engage the next enemy immediately.
pub fn on_combat_victory(state: &mut GameState, env: &GameEnv<'_>, reference: BossPhaseRef) -> Result<(), OracleError> {
    let Some(boss_id) = state.boss.as_ref().map(|boss| boss.boss_id.clone()) else {
        return Ok(());
    };
    let definition = env.boss(&boss_id)?;

    if let Some(BossPhase::Fight {
        enemies,
        sequential,
    }) = definition.phases.get(reference.phase)
    {
        let next = reference.enemy_index + 1;
        if next < enemies.len() {
            if let Some(boss) = state.boss.as_mut() {
                boss.enemy_index = next;
            }
            if *sequential {
                state.record(
                    LogKind::Boss,
                    format!("Another foe waits ({} of {}).", next + 1, enemies.len()),
                );
            } else {
                let next_ref = BossPhaseRef {
                    phase: reference.phase,
                    enemy_index: next,
                };
                start_phase_combat(state, env, &enemies[next], next_ref)?;
            }
            return Ok(());
        }
    }

    state.board.current_tile_mut().consume();
    complete_phase(state, &definition);
    Ok(())
}

/// Advances to the next phase; past the last phase the boss is defeated.
pub fn complete_phase(state: &mut GameState, definition: &BossDefinition) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.current_phase += 1;
    boss.enemy_index = 0;
    boss.phase_complete = true;
    let finished = boss.current_phase >= definition.phases.len();

    state.record(LogKind::Boss, "The phase is complete.");
    if finished {
        defeat(state, definition);
    }
}

/// Applies boss defeat and its rewards.
///
/// A terminal boss wins the run. Any other boss heals the living party,
/// strengthens the leader for good and turns its tile into an unlocked door.
pub fn defeat(state: &mut GameState, definition: &BossDefinition) {
    if let Some(boss) = state.boss.as_mut() {
        boss.defeated = true;
        boss.active = false;
    }

    let rewards = &definition.victory_rewards;
    state.gold += rewards.gold;
    state.experience += rewards.experience;
    info!(boss = %definition.name, terminal = rewards.game_complete, "boss defeated");

    if rewards.game_complete {
        state.victory = true;
        state.over = true;
        let message = if rewards.completion_message.is_empty() {
            format!("{} is vanquished. The dungeon is conquered!", definition.name)
        } else {
            rewards.completion_message.clone()
        };
        state.record(LogKind::Boss, message);
        return;
    }

    let atk_bonus = state.config.boss_reward_atk;
    let hp_bonus = state.config.boss_reward_max_hp;
    if let Some(leader) = state.party.leader_mut() {
        leader.base.atk += atk_bonus;
        leader.base.max_hp += hp_bonus;
        leader.recompute();
    }
    for member in state.party.members_mut().filter(|member| member.is_alive()) {
        member.heal_full();
    }

    let tile = state.board.current_tile_mut();
    tile.kind = TileKind::Door;
    tile.consume();
    state.key_found = true;

    state.record(
        LogKind::Boss,
        format!(
            "{} is defeated! The way onward opens (+{} gold).",
            definition.name, rewards.gold
        ),
    );
}
