use tracing::info;

use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, LogKind, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelError {
    #[error("no living leader can act")]
    NoLivingLeader,

    #[error("cannot leave during combat")]
    InCombat,

    #[error("standing on {kind}, not a door")]
    NotOnDoor { kind: TileKind },

    #[error("the door is locked; find the key first")]
    KeyMissing,

    #[error("level counter overflow")]
    LevelOverflow,

    #[error("the key flag survived the level change")]
    KeyNotReset,
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::KeyMissing | Self::InCombat => ErrorSeverity::Recoverable,
            Self::NoLivingLeader | Self::NotOnDoor { .. } => ErrorSeverity::Validation,
            Self::KeyNotReset => ErrorSeverity::Internal,
            Self::LevelOverflow => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingLeader => "LEVEL_NO_LIVING_LEADER",
            Self::InCombat => "LEVEL_IN_COMBAT",
            Self::NotOnDoor { .. } => "LEVEL_NOT_ON_DOOR",
            Self::KeyMissing => "LEVEL_KEY_MISSING",
            Self::LevelOverflow => "LEVEL_OVERFLOW",
            Self::KeyNotReset => "LEVEL_KEY_NOT_RESET",
        }
    }
}

/// Go through the unlocked door. The next level is entered at the door's
/// position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceLevelAction;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelOutcome {
    pub level: u32,
    /// Boss guarding the new level, if any.
    pub boss: Option<String>,
}

impl ActionTransition for AdvanceLevelAction {
    type Error = LevelError;
    type Result = LevelOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !state.has_living_leader() {
            return Err(LevelError::NoLivingLeader);
        }
        if state.combat_active() {
            return Err(LevelError::InCombat);
        }
        let kind = state.current_tile().kind;
        if kind != TileKind::Door {
            return Err(LevelError::NotOnDoor { kind });
        }
        if !state.key_found {
            return Err(LevelError::KeyMissing);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let level = state.level.checked_add(1).ok_or(LevelError::LevelOverflow)?;
        let entry = state.board.player();
        state.enter_level(level, entry, env);

        let boss = state
            .board
            .find_kind(TileKind::BossEncounter)
            .and_then(|tile| tile.boss_id.clone());
        match &boss {
            Some(boss_id) => state.record(
                LogKind::Boss,
                format!("You descend to level {level}. Something terrible waits here ({boss_id})."),
            ),
            None => state.record(LogKind::Info, format!("You descend to level {level}.")),
        }
        info!(level, boss = ?boss, "level advanced");

        Ok(LevelOutcome { level, boss })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.key_found {
            return Err(LevelError::KeyNotReset);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Catalog, EnemyTemplate};
    use crate::state::{Board, Position};

    fn at_unlocked_door(catalog: &Catalog) -> GameState {
        let config = GameConfig {
            starting_deck: Vec::new(),
            ..GameConfig::default()
        };
        let mut state = GameState::new_run(2, config, &catalog.as_env()).unwrap();
        let mut kinds = [TileKind::Empty; GameConfig::TILE_COUNT];
        kinds[6] = TileKind::Door;
        state.board = Board::from_kinds(1, Position::new(1, 2), kinds);
        state.key_found = true;
        state
    }

    #[test]
    fn advancing_enters_the_next_level_at_the_door() {
        let catalog = Catalog::default().with_enemy("rat", EnemyTemplate::new("Rat", 4, 1));
        let env = catalog.as_env();
        let mut state = at_unlocked_door(&catalog);

        AdvanceLevelAction.pre_validate(&state, &env).unwrap();
        let outcome = AdvanceLevelAction.apply(&mut state, &env).unwrap();
        AdvanceLevelAction.post_validate(&state, &env).unwrap();

        assert_eq!(outcome.level, 2);
        assert_eq!(state.level, 2);
        assert_eq!(state.board.player(), Position::new(1, 2));
        assert!(!state.key_found);
    }

    #[test]
    fn locked_door_is_recoverable() {
        let catalog = Catalog::default().with_enemy("rat", EnemyTemplate::new("Rat", 4, 1));
        let env = catalog.as_env();
        let mut state = at_unlocked_door(&catalog);
        state.key_found = false;

        let error = AdvanceLevelAction.pre_validate(&state, &env).unwrap_err();
        assert_eq!(error, LevelError::KeyMissing);
        assert_eq!(error.severity(), ErrorSeverity::Recoverable);
    }

    #[test]
    fn surviving_key_flag_is_an_internal_error() {
        let catalog = Catalog::default().with_enemy("rat", EnemyTemplate::new("Rat", 4, 1));
        let env = catalog.as_env();
        let state = at_unlocked_door(&catalog);

        let error = AdvanceLevelAction.post_validate(&state, &env).unwrap_err();
        assert_eq!(error, LevelError::KeyNotReset);
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert_eq!(error.error_code(), "LEVEL_KEY_NOT_RESET");
    }
}
