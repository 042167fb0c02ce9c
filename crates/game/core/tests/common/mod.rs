//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use crawl_core::combat::CHECK_DIE;
use crawl_core::env::{BossDefinition, BossPhase, EquipSlot, LevelTable, StatBonus};
use crawl_core::state::Turn;
use crawl_core::{
    Action, AllyTemplate, CardDefinition, CardEffect, CardKind, Catalog, EnemyTemplate,
    GameConfig, GameEngine, GameState, ItemDefinition, Position, RngStream, TileKind,
};

/// Content covering every card in the default starting deck.
pub fn catalog() -> Catalog {
    Catalog::new()
        .with_enemy("rat", EnemyTemplate::new("Rat", 6, 2).with_rewards(2, 1))
        .with_enemy("slime", EnemyTemplate::new("Slime", 8, 1).with_rewards(1, 1))
        .with_enemy("wolf", EnemyTemplate::new("Wolf", 10, 3).with_rewards(4, 2))
        .with_card(
            "strike",
            CardDefinition::new("Strike", CardKind::Attack, CardEffect::Strike { bonus: 1 }),
        )
        .with_card(
            "heal",
            CardDefinition::new("Heal", CardKind::Utility, CardEffect::Heal { amount: 5 }),
        )
        .with_card(
            "defend",
            CardDefinition::new("Defend", CardKind::Defense, CardEffect::Defend),
        )
        .with_card(
            "dodge",
            CardDefinition::new("Dodge", CardKind::Defense, CardEffect::Dodge),
        )
        .with_card("stun", CardDefinition::new("Stun", CardKind::Utility, CardEffect::Stun))
        .with_card(
            "scout",
            CardDefinition::new("Scout", CardKind::Utility, CardEffect::Scout { count: 2 }),
        )
        .with_card(
            "smoke",
            CardDefinition::new("Smoke Bomb", CardKind::Utility, CardEffect::Escape),
        )
        .with_card(
            "guard",
            CardDefinition::new("Guard", CardKind::Defense, CardEffect::Shield { amount: 10 }),
        )
        .with_item(
            "dagger",
            ItemDefinition::new("Dagger", EquipSlot::Weapon, StatBonus::new(0, 2, 0)),
        )
        .with_ally("squire", AllyTemplate::new("Squire", 12, 2, 0).with_card("strike"))
        .with_level(1, LevelTable::default().with_enemies(&["rat", "slime"], &["wolf"]))
}

/// Catalog whose only level is a boss level with the given phases.
pub fn boss_catalog(phases: Vec<BossPhase>) -> Catalog {
    catalog()
        .with_enemy("a", EnemyTemplate::new("Minion A", 1, 1))
        .with_enemy("b", EnemyTemplate::new("Minion B", 1, 1))
        .with_boss("warden", BossDefinition::new("The Warden", 1, phases))
}

pub fn config() -> GameConfig {
    GameConfig::default()
}

pub fn new_run(seed: u64, catalog: &Catalog) -> GameState {
    GameState::new_run(seed, config(), &catalog.as_env()).expect("run initializes")
}

/// Stream whose next d20 roll is a natural 20.
pub fn natural_twenty() -> RngStream {
    (0..)
        .map(RngStream::new)
        .find(|rng| {
            let mut trial = *rng;
            trial.roll_die(CHECK_DIE) == 20
        })
        .expect("some seed rolls a 20")
}

/// Straightforward autoplay decision: fight everything, take everything,
/// prefer unexplored neighbours.
pub fn next_action(state: &GameState) -> Action {
    if let Some(combat) = &state.combat {
        return match combat.turn {
            Turn::Player => Action::attack(),
            Turn::Enemy => Action::enemy_turn(),
        };
    }

    let tile = state.current_tile();
    match tile.kind {
        TileKind::Fight if !tile.consumed() && !tile.combat_engaged() => return Action::start_combat(),
        TileKind::Hazard if !tile.consumed() => return Action::resolve_hazard(),
        TileKind::Item if !tile.consumed() => return Action::loot(),
        TileKind::Ally if !tile.consumed() => {
            return if state.party.is_full() {
                Action::decline_ally()
            } else {
                Action::recruit_ally()
            };
        }
        TileKind::Key if !tile.consumed() => return Action::take_key(),
        TileKind::BossEncounter if !tile.consumed() => return Action::start_boss_phase(),
        TileKind::Door if state.key_found => return Action::advance_level(),
        _ => {}
    }

    let here = state.board.player();
    let open: Vec<Position> = here
        .neighbors()
        .filter(|pos| state.board.tile(*pos).is_some_and(|tile| tile.discovered()))
        .collect();
    let fresh = open
        .iter()
        .copied()
        .find(|pos| state.board.tile(*pos).is_some_and(|tile| !tile.explored()));
    let target = fresh.unwrap_or_else(|| open[(state.nonce as usize) % open.len()]);
    Action::move_to(target)
}

/// Plays up to `steps` autoplay actions, calling `inspect` after each one.
pub fn autoplay(
    state: &mut GameState,
    catalog: &Catalog,
    steps: usize,
    mut inspect: impl FnMut(&GameState, &GameState),
) {
    for _ in 0..steps {
        if state.over {
            break;
        }
        let before = state.clone();
        let action = next_action(state);
        let _ = GameEngine::new(state).execute(catalog.as_env(), &action);
        inspect(&before, state);
    }
}
