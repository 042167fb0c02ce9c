//! Combat actions: the 1v1 turn machine.
//!
//! `Idle --StartCombat--> PlayerTurn --Attack--> EnemyTurn --EnemyTurn-->
//! PlayerTurn`, until the enemy drops (victory), the party is wiped
//! (defeat) or the player escapes.

use tracing::{debug, info};

use crate::action::ActionTransition;
use crate::combat::{
    self, CHECK_DIE, CombatResolution, DAMAGE_DIE, SkillCheck, attack_damage, enemy_damage,
    flee_failure_damage, skill_check,
};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EnemySnapshot, GameState, LogKind, MemberId, StatusFlags, TileKind, Turn};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("no living leader can act")]
    NoLivingLeader,

    #[error("no combat is active")]
    NoCombat,

    #[error("a combat is already active")]
    AlreadyInCombat,

    #[error("current tile is {kind}, not a fight")]
    NotOnFightTile { kind: TileKind },

    #[error("the fight on this tile is already resolved")]
    TileConsumed,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("it is not the enemy's turn")]
    NotEnemyTurn,

    #[error("there is no fleeing from a boss")]
    BossCombatFlee,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPlayerTurn | Self::NotEnemyTurn => ErrorSeverity::Recoverable,
            Self::NoLivingLeader
            | Self::NoCombat
            | Self::AlreadyInCombat
            | Self::NotOnFightTile { .. }
            | Self::TileConsumed
            | Self::BossCombatFlee => ErrorSeverity::Validation,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingLeader => "COMBAT_NO_LIVING_LEADER",
            Self::NoCombat => "COMBAT_NO_COMBAT",
            Self::AlreadyInCombat => "COMBAT_ALREADY_IN_COMBAT",
            Self::NotOnFightTile { .. } => "COMBAT_NOT_ON_FIGHT_TILE",
            Self::TileConsumed => "COMBAT_TILE_CONSUMED",
            Self::NotPlayerTurn => "COMBAT_NOT_PLAYER_TURN",
            Self::NotEnemyTurn => "COMBAT_NOT_ENEMY_TURN",
            Self::BossCombatFlee => "COMBAT_BOSS_FLEE",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// Shared guard for actions taken by the player inside a combat.
fn require_player_turn(state: &GameState) -> Result<(), CombatError> {
    if !state.has_living_leader() {
        return Err(CombatError::NoLivingLeader);
    }
    let combat = state.combat.as_ref().ok_or(CombatError::NoCombat)?;
    if combat.turn != Turn::Player {
        return Err(CombatError::NotPlayerTurn);
    }
    Ok(())
}

// ============================================================================
// StartCombat
// ============================================================================

/// Engage the enemy on the current fight tile.
///
/// An enemy left behind by an earlier flee comes back with its remaining HP.
/// Otherwise the requested template is used, or one is drawn from the
/// level's pools.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartCombatAction {
    pub enemy: Option<String>,
}

impl StartCombatAction {
    pub fn against(enemy: impl Into<String>) -> Self {
        Self {
            enemy: Some(enemy.into()),
        }
    }

    fn draw_enemy_id(state: &mut GameState, env: &GameEnv<'_>) -> Result<String, OracleError> {
        let table = env.level_table(state.level);
        let pools = &table.enemy_pools;
        let use_rare = !pools.rare.is_empty()
            && (pools.common.is_empty() || state.rng.chance(state.config.rare_enemy_chance));
        let pool = if use_rare { &pools.rare } else { &pools.common };
        if let Some(id) = state.rng.pick(pool) {
            return Ok(id.clone());
        }

        let roster = env.enemies()?.enemy_ids();
        state
            .rng
            .pick(&roster)
            .cloned()
            .ok_or(OracleError::EmptyEnemyPool(state.level))
    }
}

impl ActionTransition for StartCombatAction {
    type Error = CombatError;
    type Result = String;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !state.has_living_leader() {
            return Err(CombatError::NoLivingLeader);
        }
        if state.combat_active() {
            return Err(CombatError::AlreadyInCombat);
        }
        let tile = state.current_tile();
        if tile.kind != TileKind::Fight {
            return Err(CombatError::NotOnFightTile { kind: tile.kind });
        }
        if tile.consumed() {
            return Err(CombatError::TileConsumed);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let snapshot = match state.board.current_tile_mut().lingering_enemy.take() {
            Some(lingering) => lingering,
            None => {
                let id = match &self.enemy {
                    Some(id) => id.clone(),
                    None => Self::draw_enemy_id(state, env)?,
                };
                let template = env.enemy(&id)?;
                EnemySnapshot::from_template(id, &template)
            }
        };

        let id = snapshot.id.clone();
        combat::begin_combat(state, snapshot, None);
        Ok(id)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.combat_active() && state.current_tile().combat_engaged() {
            Ok(())
        } else {
            Err(CombatError::NoCombat)
        }
    }
}

// ============================================================================
// Attack
// ============================================================================

/// Leader hits the enemy: `max(1, atk + d6 - 3)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub roll: u32,
    pub damage: u32,
    pub enemy_hp: u32,
    pub resolution: Option<CombatResolution>,
}

impl ActionTransition for AttackAction {
    type Error = CombatError;
    type Result = AttackOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_player_turn(state)
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let atk = state.leader().map_or(0, |leader| leader.atk);
        let roll = state.rng.roll_die(DAMAGE_DIE);
        let damage = attack_damage(atk, roll);

        let combat = state.combat.as_mut().ok_or(CombatError::NoCombat)?;
        combat.enemy.hp = combat.enemy.hp.saturating_sub(damage);
        let enemy_hp = combat.enemy.hp;
        let name = combat.enemy.name.clone();
        if enemy_hp > 0 {
            combat.turn = Turn::Enemy;
        }

        debug!(roll, damage, enemy_hp, "player attack");
        state.record(
            LogKind::Combat,
            format!("You hit {name} for {damage} (rolled {roll})."),
        );

        let resolution = if enemy_hp == 0 {
            Some(combat::resolve_victory(state, env)?)
        } else {
            None
        };

        Ok(AttackOutcome {
            roll,
            damage,
            enemy_hp,
            resolution,
        })
    }
}

// ============================================================================
// EnemyTurn
// ============================================================================

/// The enemy acts, honouring stun, dodge, shield and defend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTurnAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyTurnEvent {
    /// The enemy was stunned and lost its turn.
    Stunned,
    /// The attack was dodged.
    Dodged,
    Hit { roll: u32, damage: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTurnOutcome {
    pub event: EnemyTurnEvent,
    pub new_leader: Option<MemberId>,
    pub resolution: Option<CombatResolution>,
}

impl ActionTransition for EnemyTurnAction {
    type Error = CombatError;
    type Result = EnemyTurnOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let combat = state.combat.as_ref().ok_or(CombatError::NoCombat)?;
        if combat.turn != Turn::Enemy {
            return Err(CombatError::NotEnemyTurn);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let combat = state.combat.as_mut().ok_or(CombatError::NoCombat)?;
        let name = combat.enemy.name.clone();

        let event = if combat.status.stunned() {
            combat.status.flags.remove(StatusFlags::STUNNED);
            EnemyTurnEvent::Stunned
        } else if combat.status.dodge_next() {
            combat.status.flags.remove(StatusFlags::DODGE_NEXT);
            EnemyTurnEvent::Dodged
        } else {
            let roll = state.rng.roll_die(DAMAGE_DIE);
            let damage = enemy_damage(combat.enemy.atk, roll, &mut combat.status);
            EnemyTurnEvent::Hit { roll, damage }
        };

        let mut outcome = EnemyTurnOutcome {
            event,
            new_leader: None,
            resolution: None,
        };
        match event {
            EnemyTurnEvent::Stunned => {
                state.record(LogKind::Combat, format!("{name} is stunned and cannot act."));
            }
            EnemyTurnEvent::Dodged => {
                state.record(LogKind::Combat, format!("You dodge {name}'s attack."));
            }
            EnemyTurnEvent::Hit { roll, damage } => {
                debug!(roll, damage, "enemy attack");
                state.record(LogKind::Combat, format!("{name} hits for {damage}."));
                let report = state.damage_leader(damage);
                outcome.new_leader = report.new_leader;
                if report.wiped {
                    outcome.resolution = Some(CombatResolution::Defeat);
                }
            }
        }

        if let Some(combat) = state.combat.as_mut() {
            combat.turn = Turn::Player;
        }
        Ok(outcome)
    }
}

// ============================================================================
// Flee
// ============================================================================

/// Try to escape: d20 + leader atk vs `flee_base_difficulty + enemy atk`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeOutcome {
    pub check: SkillCheck,
    pub escaped: bool,
    /// Damage taken on a failed attempt.
    pub damage: u32,
    pub new_leader: Option<MemberId>,
    pub resolution: Option<CombatResolution>,
}

impl ActionTransition for FleeAction {
    type Error = CombatError;
    type Result = FleeOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_player_turn(state)?;
        if state.combat.as_ref().is_some_and(|combat| combat.is_boss_combat()) {
            return Err(CombatError::BossCombatFlee);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let enemy_atk = state
            .combat
            .as_ref()
            .map(|combat| combat.enemy.atk)
            .ok_or(CombatError::NoCombat)?;
        let atk = state.leader().map_or(0, |leader| leader.atk);
        let roll = state.rng.roll_die(CHECK_DIE);
        let check = skill_check(roll, atk, state.config.flee_base_difficulty + enemy_atk);

        let mut outcome = FleeOutcome {
            check,
            escaped: check.passed,
            damage: 0,
            new_leader: None,
            resolution: None,
        };

        if check.passed {
            leave_combat(state);
            return Ok(outcome);
        }

        let damage = flee_failure_damage(enemy_atk);
        state.record(
            LogKind::Combat,
            format!("Escape fails ({} vs {}); you take {damage}.", check.total, check.difficulty),
        );
        let report = state.damage_leader(damage);
        outcome.damage = damage;
        outcome.new_leader = report.new_leader;
        if report.wiped {
            outcome.resolution = Some(CombatResolution::Defeat);
        } else if let Some(combat) = state.combat.as_mut() {
            combat.turn = Turn::Enemy;
        }
        Ok(outcome)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        // A successful escape never resolves the tile.
        if !state.combat_active() && !state.over && state.current_tile().consumed() {
            return Err(CombatError::TileConsumed);
        }
        Ok(())
    }
}

/// Ends the active combat without resolving its tile; the enemy stays
/// behind with its remaining HP.
pub(crate) fn leave_combat(state: &mut GameState) {
    let Some(combat) = state.combat.take() else {
        return;
    };
    let name = combat.enemy.name.clone();
    if let Some(tile) = state.board.tile_mut(combat.origin) {
        tile.lingering_enemy = Some(combat.enemy);
    }
    info!(enemy = %name, "escaped combat");
    state.record(LogKind::Combat, format!("You escape from {name}."));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Catalog, EnemyTemplate};
    use crate::grid;
    use crate::rng::RngStream;
    use crate::state::{Board, Position};

    fn catalog() -> Catalog {
        Catalog::default()
            .with_enemy("rat", EnemyTemplate::new("Rat", 4, 2))
            .with_enemy("ogre", EnemyTemplate::new("Ogre", 40, 9))
    }

    fn fight_state(catalog: &Catalog) -> GameState {
        let config = GameConfig {
            starting_deck: Vec::new(),
            ..GameConfig::default()
        };
        let mut state = GameState::new_run(7, config, &catalog.as_env()).unwrap();
        let mut kinds = [TileKind::Empty; GameConfig::TILE_COUNT];
        kinds[4] = TileKind::Fight;
        state.board = Board::from_kinds(1, Position::new(1, 0), kinds);
        grid::explore(&mut state.board, Position::new(1, 0));
        state
    }

    /// RNG whose next d20 roll is a natural 20.
    fn natural_twenty() -> RngStream {
        (0..)
            .map(RngStream::new)
            .find(|rng| {
                let mut trial = *rng;
                trial.roll_die(CHECK_DIE) == 20
            })
            .unwrap()
    }

    #[test]
    fn start_combat_engages_tile_and_player_acts_first() {
        let catalog = catalog();
        let env = catalog.as_env();
        let mut state = fight_state(&catalog);

        let action = StartCombatAction::against("rat");
        action.pre_validate(&state, &env).unwrap();
        assert_eq!(action.apply(&mut state, &env).unwrap(), "rat");

        let combat = state.combat.as_ref().unwrap();
        assert_eq!(combat.turn, Turn::Player);
        assert_eq!(combat.enemy.hp, 4);
        assert!(state.current_tile().combat_engaged());
        assert!(!state.is_tile_completed());
    }

    #[test]
    fn unknown_enemy_is_an_oracle_error() {
        let catalog = catalog();
        let env = catalog.as_env();
        let mut state = fight_state(&catalog);
        let err = StartCombatAction::against("dragon")
            .apply(&mut state, &env)
            .unwrap_err();
        assert_eq!(err, CombatError::Oracle(OracleError::EnemyNotFound("dragon".into())));
    }

    #[test]
    fn natural_twenty_flee_leaves_tile_unconsumed() {
        let catalog = Catalog::default().with_enemy("brute", EnemyTemplate::new("Brute", 10, 2));
        let env = catalog.as_env();
        let mut state = fight_state(&catalog);
        state.party.leader_mut().unwrap().atk = 2;
        StartCombatAction::against("brute").apply(&mut state, &env).unwrap();

        state.rng = natural_twenty();
        let outcome = FleeAction.apply(&mut state, &env).unwrap();

        assert_eq!(outcome.check.total, 22);
        assert_eq!(outcome.check.difficulty, 14);
        assert!(outcome.escaped);
        assert!(state.combat.is_none());
        let tile = state.current_tile();
        assert!(!tile.consumed());
        assert!(tile.is_completed(false));
        assert_eq!(tile.lingering_enemy.as_ref().unwrap().id, "brute");
    }

    #[test]
    fn fled_enemy_returns_with_remaining_hp() {
        let catalog = catalog();
        let env = catalog.as_env();
        let mut state = fight_state(&catalog);
        StartCombatAction::against("ogre").apply(&mut state, &env).unwrap();
        state.combat.as_mut().unwrap().enemy.hp = 13;
        leave_combat(&mut state);

        let id = StartCombatAction::against("rat").apply(&mut state, &env).unwrap();
        assert_eq!(id, "ogre");
        assert_eq!(state.combat.as_ref().unwrap().enemy.hp, 13);
    }

    #[test]
    fn flee_from_boss_combat_is_rejected() {
        let catalog = catalog();
        let env = catalog.as_env();
        let mut state = fight_state(&catalog);
        StartCombatAction::against("rat").apply(&mut state, &env).unwrap();
        state.combat.as_mut().unwrap().boss_phase = Some(crate::state::BossPhaseRef {
            phase: 0,
            enemy_index: 0,
        });
        assert_eq!(FleeAction.pre_validate(&state, &env), Err(CombatError::BossCombatFlee));
    }

    #[test]
    fn stunned_enemy_skips_turn() {
        let catalog = catalog();
        let env = catalog.as_env();
        let mut state = fight_state(&catalog);
        StartCombatAction::against("ogre").apply(&mut state, &env).unwrap();
        let combat = state.combat.as_mut().unwrap();
        combat.turn = Turn::Enemy;
        combat.status.flags.insert(StatusFlags::STUNNED);
        let hp = state.leader().unwrap().hp;

        let outcome = EnemyTurnAction.apply(&mut state, &env).unwrap();
        assert_eq!(outcome.event, EnemyTurnEvent::Stunned);
        assert_eq!(state.leader().unwrap().hp, hp);
        let combat = state.combat.as_ref().unwrap();
        assert_eq!(combat.turn, Turn::Player);
        assert!(!combat.status.stunned());
    }

    #[test]
    fn attack_requires_player_turn() {
        let catalog = catalog();
        let env = catalog.as_env();
        let mut state = fight_state(&catalog);
        assert_eq!(AttackAction.pre_validate(&state, &env), Err(CombatError::NoCombat));
        StartCombatAction::against("ogre").apply(&mut state, &env).unwrap();
        state.combat.as_mut().unwrap().turn = Turn::Enemy;
        assert_eq!(AttackAction.pre_validate(&state, &env), Err(CombatError::NotPlayerTurn));
    }

    #[test]
    fn killing_blow_consumes_tile_and_grants_rewards() {
        let catalog = Catalog::default()
            .with_enemy("moth", EnemyTemplate::new("Moth", 1, 1).with_rewards(3, 2));
        let env = catalog.as_env();
        let mut state = fight_state(&catalog);
        StartCombatAction::against("moth").apply(&mut state, &env).unwrap();

        let outcome = AttackAction.apply(&mut state, &env).unwrap();
        assert_eq!(outcome.resolution, Some(CombatResolution::Victory));
        assert!(state.combat.is_none());
        assert!(state.current_tile().consumed());
        assert_eq!(state.current_tile().engagement(), crate::state::Engagement::Resolved);
        assert_eq!((state.gold, state.experience), (3, 2));
    }
}
