mod common;

use crawl_core::action::{ActionResult, EnemyTurnEvent};
use crawl_core::boss::BossPhaseEvent;
use crawl_core::combat::CombatResolution;
use crawl_core::env::{BossDefinition, BossPhase, EnemyTemplate, VictoryRewards};
use crawl_core::state::{BaseStats, PartyMember, Stat, Turn};
use crawl_core::{
    Action, Board, CardId, Catalog, ExecuteError, GameConfig, GameEngine, GameState,
    LeaderConfig, Position, TileKind,
};

use common::{boss_catalog, catalog, natural_twenty, new_run};

fn execute(state: &mut GameState, catalog: &crawl_core::Catalog, action: Action) -> ActionResult {
    GameEngine::new(state)
        .execute(catalog.as_env(), &action)
        .unwrap_or_else(|error| panic!("{action:?} rejected: {error}"))
        .action_result
}

/// Puts a fresh copy of card `id` into the hand.
fn give(state: &mut GameState, catalog: &Catalog, id: &str) -> CardId {
    let card = state.create_card(id, &catalog.cards[id]);
    let card_id = card.id;
    state.receive_card(card);
    card_id
}

/// Path from the default entrance to the boss tile at (3, 3).
const BOSS_WALK: [(usize, usize); 5] = [(2, 0), (3, 0), (3, 1), (3, 2), (3, 3)];

/// Board with a fight tile at (1, 1) and the player on the entrance.
fn fight_board() -> Board {
    let mut kinds = [TileKind::Empty; GameConfig::TILE_COUNT];
    kinds[4] = TileKind::Start;
    kinds[5] = TileKind::Fight;
    let mut board = Board::from_kinds(1, Position::new(1, 0), kinds);
    crawl_core::grid::explore(&mut board, Position::new(1, 0));
    crawl_core::grid::reveal_adjacent(&mut board, Position::new(1, 0));
    board
}

#[test]
fn first_step_from_the_entrance_explores_and_reveals() {
    let catalog = catalog();
    let mut state = new_run(12345, &catalog);
    assert_eq!(state.board.player(), Position::new(1, 0));
    assert_eq!(state.current_tile().kind, TileKind::Start);

    let target = Position::new(1, 1);
    assert!(state.board.tile(target).unwrap().discovered());
    assert!(state.can_move_to(target));

    execute(&mut state, &catalog, Action::move_to(target));

    assert_eq!(state.board.player(), target);
    assert!(state.board.tile(target).unwrap().explored());
    for neighbor in target.neighbors() {
        assert!(state.board.tile(neighbor).unwrap().discovered(), "{neighbor} hidden");
    }
}

#[test]
fn sequential_boss_fight_requires_reentry_between_minions() {
    let catalog = boss_catalog(vec![
        BossPhase::Fight {
            enemies: vec!["a".to_string(), "b".to_string()],
            sequential: true,
        },
        BossPhase::Choice,
    ]);
    let mut state = new_run(3, &catalog);
    let boss_tile = Position::new(3, 3);
    assert_eq!(state.board.tile(boss_tile).unwrap().kind, TileKind::BossEncounter);

    for step in [(2, 0), (3, 0), (3, 1), (3, 2), (3, 3)] {
        execute(&mut state, &catalog, Action::move_to(Position::new(step.0, step.1)));
    }

    execute(&mut state, &catalog, Action::start_boss_phase());
    assert_eq!(state.combat.as_ref().unwrap().enemy.id, "a");
    let ActionResult::Attack(attack) = execute(&mut state, &catalog, Action::attack()) else {
        panic!("expected an attack result");
    };
    assert_eq!(attack.resolution, Some(CombatResolution::Victory));

    let boss = state.boss.as_ref().unwrap();
    assert_eq!(boss.enemy_index, 1);
    assert_eq!(boss.current_phase, 0);
    assert!(!state.combat_active());
    assert!(!state.current_tile().consumed());
    assert!(!state.is_tile_completed());

    execute(&mut state, &catalog, Action::start_boss_phase());
    assert_eq!(state.combat.as_ref().unwrap().enemy.id, "b");
    execute(&mut state, &catalog, Action::attack());

    let boss = state.boss.as_ref().unwrap();
    assert!(state.current_tile().consumed());
    assert_eq!(boss.current_phase, 1);
    assert_eq!(boss.enemy_index, 0);
    assert!(boss.phase_complete);
    assert!(!boss.defeated);

    execute(&mut state, &catalog, Action::start_boss_phase());
    assert!(state.boss.as_ref().unwrap().defeated);
    assert_eq!(state.current_tile().kind, TileKind::Door);
    assert!(state.key_found);
    assert!(!state.over);
}

#[test]
fn non_sequential_boss_fight_chains_minions() {
    let catalog = boss_catalog(vec![BossPhase::Fight {
        enemies: vec!["a".to_string(), "b".to_string()],
        sequential: false,
    }]);
    let mut state = new_run(4, &catalog);
    for step in [(2, 0), (3, 0), (3, 1), (3, 2), (3, 3)] {
        execute(&mut state, &catalog, Action::move_to(Position::new(step.0, step.1)));
    }

    execute(&mut state, &catalog, Action::start_boss_phase());
    execute(&mut state, &catalog, Action::attack());
    assert_eq!(state.combat.as_ref().unwrap().enemy.id, "b");

    let leader_base_atk = state.leader().unwrap().base.atk;
    execute(&mut state, &catalog, Action::attack());
    assert!(state.boss.as_ref().unwrap().defeated);
    assert_eq!(
        state.leader().unwrap().base.atk,
        leader_base_atk + state.config.boss_reward_atk
    );
}

#[test]
fn natural_twenty_escape_leaves_fight_tile_unresolved() {
    let catalog = catalog();
    let config = GameConfig {
        leader: LeaderConfig {
            atk: 2,
            ..LeaderConfig::default()
        },
        ..GameConfig::default()
    };
    let mut state = GameState::new_run(8, config, &catalog.as_env()).unwrap();
    state.board = fight_board();

    execute(&mut state, &catalog, Action::move_to(Position::new(1, 1)));
    execute(&mut state, &catalog, Action::start_combat_with("rat"));
    state.rng = natural_twenty();

    let ActionResult::Flee(flee) = execute(&mut state, &catalog, Action::flee()) else {
        panic!("expected a flee result");
    };
    assert_eq!(flee.check.roll, 20);
    assert_eq!(flee.check.total, 22);
    assert_eq!(flee.check.difficulty, 14);
    assert!(flee.escaped);

    assert!(!state.combat_active());
    let tile = state.current_tile();
    assert!(!tile.consumed());
    assert!(tile.lingering_enemy.is_some());
    assert!(state.is_tile_completed());
    assert!(state.can_move_to(Position::new(1, 0)));
}

#[test]
fn fresh_fight_tile_cannot_be_left_before_combat_starts() {
    let catalog = catalog();
    let mut state = new_run(21, &catalog);
    state.board = fight_board();

    execute(&mut state, &catalog, Action::move_to(Position::new(1, 1)));
    assert!(!state.is_tile_completed());
    assert_eq!(
        state.requirement_text(),
        Some("Defeat the enemy guarding this room.")
    );
    assert!(
        GameEngine::new(&mut state)
            .execute(catalog.as_env(), &Action::move_to(Position::new(1, 0)))
            .is_err()
    );

    execute(&mut state, &catalog, Action::start_combat_with("wolf"));
    assert!(!state.is_tile_completed());
    state.rng = natural_twenty();
    execute(&mut state, &catalog, Action::flee());
    execute(&mut state, &catalog, Action::move_to(Position::new(1, 0)));
}

#[test]
fn leader_succession_keeps_the_run_alive_until_the_last_member_falls() {
    let catalog = catalog();
    let mut state = new_run(5, &catalog);
    state.board = fight_board();
    for name in ["Squire", "Mage"] {
        let id = state.allocate_member_id();
        let member = PartyMember::new(id, name, BaseStats::new(10, 2, 1));
        assert!(state.party.push(member).is_ok());
    }
    let founder = state.leader().unwrap().id;

    execute(&mut state, &catalog, Action::move_to(Position::new(1, 1)));
    execute(&mut state, &catalog, Action::start_combat_with("wolf"));
    state.party.leader_mut().unwrap().hp = 1;
    state.combat.as_mut().unwrap().turn = Turn::Enemy;

    let ActionResult::EnemyTurn(turn) = execute(&mut state, &catalog, Action::enemy_turn()) else {
        panic!("expected an enemy turn result");
    };
    assert!(matches!(turn.event, EnemyTurnEvent::Hit { .. }));
    let successor = state.leader().unwrap();
    assert_ne!(successor.id, founder);
    assert!(successor.is_alive());
    assert_eq!(turn.new_leader, Some(successor.id));
    assert_eq!(state.party.len(), 2);
    assert!(!state.over);
    assert_eq!(state.combat.as_ref().unwrap().player_hp, successor.hp);

    // Leave only the current leader standing, one hit from death.
    state.party.leader_mut().unwrap().hp = 1;
    for member in state.party.members_mut().skip(1) {
        member.hp = 0;
    }
    state.combat.as_mut().unwrap().turn = Turn::Enemy;
    let ActionResult::EnemyTurn(turn) = execute(&mut state, &catalog, Action::enemy_turn()) else {
        panic!("expected an enemy turn result");
    };
    assert_eq!(turn.resolution, Some(CombatResolution::Defeat));
    assert!(state.over);
    assert!(!state.victory);
    assert!(!state.combat_active());
}

#[test]
fn failed_boss_hazard_still_advances_the_phase() {
    let catalog = boss_catalog(vec![
        BossPhase::Hazard {
            difficulty: 100,
            stat: Stat::Atk,
            damage: 3,
        },
        BossPhase::Choice,
    ]);
    let mut state = new_run(6, &catalog);
    for step in BOSS_WALK {
        execute(&mut state, &catalog, Action::move_to(Position::new(step.0, step.1)));
    }
    let hp_before = state.leader().unwrap().hp;

    let ActionResult::StartBossPhase(outcome) =
        execute(&mut state, &catalog, Action::start_boss_phase())
    else {
        panic!("expected a boss phase result");
    };
    let BossPhaseEvent::HazardResolved { check, damage } = outcome.event else {
        panic!("expected a hazard phase, got {:?}", outcome.event);
    };
    assert!(!check.passed);
    assert_eq!(damage, 3);
    assert_eq!(state.leader().unwrap().hp, hp_before - 3);

    let boss = state.boss.as_ref().unwrap();
    assert_eq!(boss.current_phase, 1);
    assert!(!boss.defeated);
    assert!(!state.over);
}

#[test]
fn terminal_boss_ends_the_run_in_victory() {
    let rewards = VictoryRewards {
        gold: 50,
        game_complete: true,
        ..VictoryRewards::default()
    };
    let catalog = catalog()
        .with_enemy("lich", EnemyTemplate::new("Lich", 1, 1))
        .with_boss(
            "lich",
            BossDefinition::new("The Lich", 1, vec![BossPhase::BossFight {
                enemy: "lich".to_string(),
            }])
            .with_rewards(rewards),
        );
    let mut state = new_run(9, &catalog);
    for step in BOSS_WALK {
        execute(&mut state, &catalog, Action::move_to(Position::new(step.0, step.1)));
    }

    execute(&mut state, &catalog, Action::start_boss_phase());
    let ActionResult::Attack(attack) = execute(&mut state, &catalog, Action::attack()) else {
        panic!("expected an attack result");
    };
    assert_eq!(attack.resolution, Some(CombatResolution::Victory));

    assert!(state.boss.as_ref().unwrap().defeated);
    assert!(state.victory);
    assert!(state.over);
    assert!(state.gold >= 50);
    let rejected = GameEngine::new(&mut state).execute(catalog.as_env(), &Action::move_to(Position::new(3, 2)));
    assert_eq!(rejected.unwrap_err(), ExecuteError::GameOver);
}

#[test]
fn dodged_enemy_attack_leaves_the_leader_untouched() {
    let catalog = catalog();
    let mut state = new_run(14, &catalog);
    state.board = fight_board();
    execute(&mut state, &catalog, Action::move_to(Position::new(1, 1)));
    execute(&mut state, &catalog, Action::start_combat_with("wolf"));

    let dodge = give(&mut state, &catalog, "dodge");
    execute(&mut state, &catalog, Action::play_card(dodge));
    assert!(state.combat.as_ref().unwrap().status.dodge_next());
    execute(&mut state, &catalog, Action::attack());
    let hp_before = state.leader().unwrap().hp;

    let ActionResult::EnemyTurn(turn) = execute(&mut state, &catalog, Action::enemy_turn()) else {
        panic!("expected an enemy turn result");
    };
    assert_eq!(turn.event, EnemyTurnEvent::Dodged);
    assert_eq!(state.leader().unwrap().hp, hp_before);
    let combat = state.combat.as_ref().unwrap();
    assert!(!combat.status.dodge_next());
    assert_eq!(combat.turn, Turn::Player);
}

#[test]
fn shield_absorbs_the_next_hit() {
    let catalog = catalog();
    let mut state = new_run(15, &catalog);
    state.board = fight_board();
    execute(&mut state, &catalog, Action::move_to(Position::new(1, 1)));
    execute(&mut state, &catalog, Action::start_combat_with("wolf"));

    let guard = give(&mut state, &catalog, "guard");
    execute(&mut state, &catalog, Action::play_card(guard));
    assert_eq!(state.combat.as_ref().unwrap().status.damage_reduction, 10);
    execute(&mut state, &catalog, Action::attack());
    let hp_before = state.leader().unwrap().hp;

    let ActionResult::EnemyTurn(turn) = execute(&mut state, &catalog, Action::enemy_turn()) else {
        panic!("expected an enemy turn result");
    };
    assert!(matches!(turn.event, EnemyTurnEvent::Hit { damage: 0, .. }));
    assert_eq!(state.leader().unwrap().hp, hp_before);
    assert_eq!(state.combat.as_ref().unwrap().status.damage_reduction, 0);
}

#[test]
fn escape_card_leaves_the_fight_tile_unresolved() {
    let catalog = catalog();
    let mut state = new_run(16, &catalog);
    state.board = fight_board();
    execute(&mut state, &catalog, Action::move_to(Position::new(1, 1)));
    execute(&mut state, &catalog, Action::start_combat_with("wolf"));

    let smoke = give(&mut state, &catalog, "smoke");
    let ActionResult::PlayCard(played) = execute(&mut state, &catalog, Action::play_card(smoke)) else {
        panic!("expected a card result");
    };
    assert!(played.fired);
    assert!(!state.combat_active());

    let tile = state.current_tile();
    assert!(!tile.consumed());
    assert_eq!(tile.lingering_enemy.as_ref().map(|enemy| enemy.id.as_str()), Some("wolf"));
    assert!(state.is_tile_completed());
    assert!(state.can_move_to(Position::new(1, 0)));
}

#[test]
fn scout_card_discovers_hidden_tiles() {
    let catalog = catalog();
    let mut state = new_run(17, &catalog);
    let hidden_before = state.board.hidden_positions();
    assert!(hidden_before.len() >= 2);

    let scout = give(&mut state, &catalog, "scout");
    let ActionResult::PlayCard(played) = execute(&mut state, &catalog, Action::play_card(scout)) else {
        panic!("expected a card result");
    };
    assert!(played.fired);

    let hidden_after = state.board.hidden_positions();
    assert_eq!(hidden_after.len(), hidden_before.len() - 2);
    for position in hidden_after {
        assert!(hidden_before.contains(&position));
    }
}

#[test]
fn combat_cards_fizzle_outside_combat() {
    let catalog = catalog();
    let mut state = new_run(18, &catalog);
    let rng_before = state.rng;

    let strike = give(&mut state, &catalog, "strike");
    let ActionResult::PlayCard(played) = execute(&mut state, &catalog, Action::play_card(strike)) else {
        panic!("expected a card result");
    };
    assert!(!played.fired);
    assert_eq!(state.rng, rng_before);
    assert!(state.cards.discard.iter().any(|card| card.id == strike));
}
