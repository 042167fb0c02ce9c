//! Deterministic autoplay policy.
//!
//! The policy reads only the game state and the catalog, so a seed fully
//! determines the run it plays.

use std::collections::VecDeque;

use crawl_core::combat::CombatResolution;
use crawl_core::state::Turn;
use crawl_core::{
    Action, ActionResult, CardEffect, Catalog, ExecuteError, GameConfig, GameEngine, GameState,
    InitializationError, Position, TileKind, compute_state_root,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Picks the next action for `state`.
pub fn choose(state: &GameState, catalog: &Catalog) -> Action {
    if let Some(pending) = &state.cards.pending_overflow {
        let drop = state
            .cards
            .hand
            .cards()
            .first()
            .map_or(pending.id, |card| card.id);
        return Action::resolve_overflow(drop);
    }
    match &state.combat {
        Some(_) => choose_in_combat(state),
        None => choose_exploring(state, catalog),
    }
}

fn find_card(state: &GameState, wanted: impl Fn(&CardEffect) -> bool) -> Option<Action> {
    state
        .cards
        .hand
        .cards()
        .iter()
        .find(|card| wanted(&card.effect))
        .map(|card| Action::play_card(card.id))
}

fn choose_in_combat(state: &GameState) -> Action {
    let Some(combat) = &state.combat else {
        return Action::attack();
    };
    if combat.turn == Turn::Enemy {
        return Action::enemy_turn();
    }
    let Some(leader) = state.leader() else {
        return Action::attack();
    };

    if leader.hp * 3 <= leader.max_hp {
        if let Some(heal) = find_card(state, |effect| matches!(effect, CardEffect::Heal { .. })) {
            return heal;
        }
        if !combat.is_boss_combat() {
            return find_card(state, |effect| matches!(effect, CardEffect::Escape))
                .unwrap_or_else(Action::flee);
        }
    }

    let threatened = combat.enemy.atk + 3 >= leader.hp;
    let guarded = !combat.status.flags.is_empty() || combat.status.damage_reduction > 0;
    if threatened && !guarded {
        let defensive = find_card(state, |effect| {
            matches!(
                effect,
                CardEffect::Stun | CardEffect::Dodge | CardEffect::Defend | CardEffect::Shield { .. }
            )
        });
        if let Some(action) = defensive {
            return action;
        }
    }

    find_card(state, |effect| {
        matches!(effect, CardEffect::Strike { .. } | CardEffect::Spell { .. })
    })
    .unwrap_or_else(Action::attack)
}

fn choose_exploring(state: &GameState, catalog: &Catalog) -> Action {
    if let Some(leader) = state.leader() {
        let free_slot = state.inventory.iter().find(|item| {
            catalog
                .items
                .get(item.as_str())
                .is_some_and(|definition| leader.equipment.get(definition.slot).is_none())
        });
        if let Some(item) = free_slot {
            return Action::equip(leader.id, item.clone());
        }
        if leader.hp * 2 <= leader.max_hp {
            let heal = find_card(state, |effect| {
                matches!(effect, CardEffect::Heal { .. } | CardEffect::Rally { .. })
            });
            if let Some(heal) = heal {
                return heal;
            }
        }
    }

    let tile = state.current_tile();
    if !tile.consumed() {
        match tile.kind {
            TileKind::Fight if !tile.combat_engaged() => return Action::start_combat(),
            TileKind::Hazard => return Action::resolve_hazard(),
            TileKind::Item => return Action::loot(),
            TileKind::Ally if state.party.is_full() => return Action::decline_ally(),
            TileKind::Ally => return Action::recruit_ally(),
            TileKind::Key => return Action::take_key(),
            _ => {}
        }
    }
    // A defeated boss tile turns into the door, so the kind alone tells.
    if tile.kind == TileKind::BossEncounter {
        return Action::start_boss_phase();
    }
    if tile.kind == TileKind::Door && state.key_found {
        return Action::advance_level();
    }

    if let Some(step) = next_step(state) {
        return Action::move_to(step);
    }
    if let Some(scout) = find_card(state, |effect| matches!(effect, CardEffect::Scout { .. })) {
        return scout;
    }

    // Nothing left to find: wander deterministically.
    let here = state.board.player();
    let open: Vec<Position> = here
        .neighbors()
        .filter(|pos| state.board.tile(*pos).is_some_and(|tile| tile.discovered()))
        .collect();
    match open.get(state.nonce as usize % open.len().max(1)) {
        Some(target) => Action::move_to(*target),
        None => Action::resolve_hazard(),
    }
}

/// First step of the shortest walk over discovered tiles towards the most
/// useful goal: the door once the key is in hand, otherwise the nearest
/// unexplored room or an unfinished boss.
fn next_step(state: &GameState) -> Option<Position> {
    let board = &state.board;
    let start = board.player();
    let is_goal = |pos: Position| {
        let Some(tile) = board.tile(pos) else {
            return false;
        };
        if state.key_found && tile.kind == TileKind::Door {
            return true;
        }
        !tile.explored() || tile.kind == TileKind::BossEncounter
    };

    let mut previous = [None; GameConfig::TILE_COUNT];
    let mut visited = [false; GameConfig::TILE_COUNT];
    let mut queue = VecDeque::from([start]);
    visited[start.index()?] = true;

    while let Some(current) = queue.pop_front() {
        if current != start && is_goal(current) {
            let mut step = current;
            while let Some(before) = previous[step.index()?] {
                if before == start {
                    return Some(step);
                }
                step = before;
            }
            return Some(step);
        }
        for neighbor in current.neighbors() {
            let Some(index) = neighbor.index() else {
                continue;
            };
            let open = board.tile(neighbor).is_some_and(|tile| tile.discovered());
            if open && !visited[index] {
                visited[index] = true;
                previous[index] = Some(current);
                queue.push_back(neighbor);
            }
        }
    }
    None
}

/// Final summary of one autoplayed run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub actions: u64,
    pub level: u32,
    pub over: bool,
    pub victory: bool,
    pub gold: u32,
    pub experience: u32,
    pub party: Vec<MemberReport>,
    pub inventory: Vec<String>,
    pub outcome: RunOutcome,
    /// Hex SHA-256 of the final state.
    pub state_root: String,
    #[serde(skip)]
    pub log: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberReport {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub mag: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Victory,
    Defeat,
    /// The action budget ran out first.
    Unfinished,
    /// The policy proposed an action the engine rejected.
    Stalled { action: String, reason: String },
}

/// Autoplays `seed` for at most `max_actions` accepted actions.
pub fn simulate(
    seed: u64,
    catalog: &Catalog,
    config: &GameConfig,
    max_actions: u64,
) -> Result<RunReport, InitializationError> {
    let mut state = GameState::new_run(seed, config.clone(), &catalog.as_env())?;
    let mut stalled = None;

    while !state.over && state.nonce < max_actions {
        let action = choose(&state, catalog);
        match GameEngine::new(&mut state).execute(catalog.as_env(), &action) {
            Ok(outcome) => {
                debug!(seed, nonce = outcome.nonce, action = action.as_snake_case(), "step");
                if let ActionResult::Attack(attack) = &outcome.action_result {
                    if attack.resolution == Some(CombatResolution::Victory) {
                        debug!(seed, "enemy defeated");
                    }
                }
            }
            Err(error) => {
                warn!(seed, action = action.as_snake_case(), "autoplay stalled: {error}");
                stalled = Some(stall(&action, &error));
                break;
            }
        }
    }

    let outcome = match stalled {
        Some(outcome) => outcome,
        None if state.victory => RunOutcome::Victory,
        None if state.over => RunOutcome::Defeat,
        None => RunOutcome::Unfinished,
    };
    Ok(report(seed, &state, outcome))
}

fn stall(action: &Action, error: &ExecuteError) -> RunOutcome {
    RunOutcome::Stalled {
        action: action.as_snake_case().to_string(),
        reason: error.to_string(),
    }
}

fn report(seed: u64, state: &GameState, outcome: RunOutcome) -> RunReport {
    RunReport {
        seed,
        actions: state.nonce,
        level: state.level,
        over: state.over,
        victory: state.victory,
        gold: state.gold,
        experience: state.experience,
        party: state
            .party
            .members()
            .iter()
            .map(|member| MemberReport {
                name: member.name.clone(),
                hp: member.hp,
                max_hp: member.max_hp,
                atk: member.atk,
                mag: member.mag,
            })
            .collect(),
        inventory: state.inventory.clone(),
        outcome,
        state_root: hex::encode(compute_state_root(state)),
        log: state
            .log()
            .entries()
            .map(|entry| format!("[{:>4}] {:<8} {}", entry.nonce, entry.kind.as_ref(), entry.message))
            .collect(),
    }
}
