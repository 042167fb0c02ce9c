use crate::action::ActionTransition;
use crate::boss::{self, BossPhaseEvent};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossError {
    #[error("no living leader can act")]
    NoLivingLeader,

    #[error("a combat is already active")]
    InCombat,

    #[error("standing on {kind}, not a boss tile")]
    NotOnBossTile { kind: TileKind },

    #[error("boss tile carries no boss id")]
    MissingBossId,

    #[error("boss '{0}' is already defeated")]
    AlreadyDefeated(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for BossError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InCombat => ErrorSeverity::Recoverable,
            Self::NoLivingLeader | Self::NotOnBossTile { .. } | Self::AlreadyDefeated(_) => {
                ErrorSeverity::Validation
            }
            Self::MissingBossId => ErrorSeverity::Internal,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingLeader => "BOSS_NO_LIVING_LEADER",
            Self::InCombat => "BOSS_IN_COMBAT",
            Self::NotOnBossTile { .. } => "BOSS_NOT_ON_BOSS_TILE",
            Self::MissingBossId => "BOSS_MISSING_ID",
            Self::AlreadyDefeated(_) => "BOSS_ALREADY_DEFEATED",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// Start (or resume) the current phase of the boss on this tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartBossPhaseAction;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossPhaseOutcome {
    /// Index of the phase that was started.
    pub phase: usize,
    pub event: BossPhaseEvent,
    pub defeated: bool,
}

impl StartBossPhaseAction {
    fn boss_id(state: &GameState) -> Result<String, BossError> {
        let tile = state.current_tile();
        if tile.kind != TileKind::BossEncounter {
            return Err(BossError::NotOnBossTile { kind: tile.kind });
        }
        tile.boss_id.clone().ok_or(BossError::MissingBossId)
    }
}

impl ActionTransition for StartBossPhaseAction {
    type Error = BossError;
    type Result = BossPhaseOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !state.has_living_leader() {
            return Err(BossError::NoLivingLeader);
        }
        if state.combat_active() {
            return Err(BossError::InCombat);
        }
        let boss_id = Self::boss_id(state)?;
        let defeated = state
            .boss
            .as_ref()
            .is_some_and(|boss| boss.boss_id == boss_id && boss.defeated);
        if defeated {
            return Err(BossError::AlreadyDefeated(boss_id));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let boss_id = Self::boss_id(state)?;
        let phase = state
            .boss
            .as_ref()
            .filter(|boss| boss.boss_id == boss_id)
            .map_or(0, |boss| boss.current_phase);

        let event = boss::run_phase(state, env, &boss_id)?;
        let defeated = state.boss.as_ref().is_some_and(|boss| boss.defeated);
        Ok(BossPhaseOutcome {
            phase,
            event,
            defeated,
        })
    }
}
