//! Error types for action execution pipeline.

use crate::action::{
    AdvanceLevelAction, AttackAction, ActionTransition, DeclineAllyAction, DismissAction,
    EnemyTurnAction, EquipAction, FleeAction, LootAction, MoveAction, PlayCardAction,
    RecruitAllyAction, ResolveHazardAction, ResolveOverflowAction, StartBossPhaseAction,
    StartCombatAction, TakeKeyAction, UnequipAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the game engine.
///
/// Every variant leaves the state as it was before the action, apart from
/// the rejection entry appended to the log.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("the run is over")]
    GameOver,

    #[error("a card is waiting for a hand slot; resolve the overflow first")]
    OverflowPending,

    #[error("move action failed: {0}")]
    Move(PhaseError<MoveAction>),

    #[error("start combat action failed: {0}")]
    StartCombat(PhaseError<StartCombatAction>),

    #[error("attack action failed: {0}")]
    Attack(PhaseError<AttackAction>),

    #[error("enemy turn failed: {0}")]
    EnemyTurn(PhaseError<EnemyTurnAction>),

    #[error("flee action failed: {0}")]
    Flee(PhaseError<FleeAction>),

    #[error("play card action failed: {0}")]
    PlayCard(PhaseError<PlayCardAction>),

    #[error("resolve overflow action failed: {0}")]
    ResolveOverflow(PhaseError<ResolveOverflowAction>),

    #[error("resolve hazard action failed: {0}")]
    ResolveHazard(PhaseError<ResolveHazardAction>),

    #[error("take key action failed: {0}")]
    TakeKey(PhaseError<TakeKeyAction>),

    #[error("loot action failed: {0}")]
    Loot(PhaseError<LootAction>),

    #[error("recruit ally action failed: {0}")]
    RecruitAlly(PhaseError<RecruitAllyAction>),

    #[error("decline ally action failed: {0}")]
    DeclineAlly(PhaseError<DeclineAllyAction>),

    #[error("advance level action failed: {0}")]
    AdvanceLevel(PhaseError<AdvanceLevelAction>),

    #[error("boss phase action failed: {0}")]
    StartBossPhase(PhaseError<StartBossPhaseAction>),

    #[error("equip action failed: {0}")]
    Equip(PhaseError<EquipAction>),

    #[error("unequip action failed: {0}")]
    Unequip(PhaseError<UnequipAction>),

    #[error("dismiss action failed: {0}")]
    Dismiss(PhaseError<DismissAction>),
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver => ErrorSeverity::Validation,
            Self::OverflowPending => ErrorSeverity::Recoverable,
            Self::Move(e) => e.error.severity(),
            Self::StartCombat(e) => e.error.severity(),
            Self::Attack(e) => e.error.severity(),
            Self::EnemyTurn(e) => e.error.severity(),
            Self::Flee(e) => e.error.severity(),
            Self::PlayCard(e) => e.error.severity(),
            Self::ResolveOverflow(e) => e.error.severity(),
            Self::ResolveHazard(e) => e.error.severity(),
            Self::TakeKey(e) => e.error.severity(),
            Self::Loot(e) => e.error.severity(),
            Self::RecruitAlly(e) => e.error.severity(),
            Self::DeclineAlly(e) => e.error.severity(),
            Self::AdvanceLevel(e) => e.error.severity(),
            Self::StartBossPhase(e) => e.error.severity(),
            Self::Equip(e) => e.error.severity(),
            Self::Unequip(e) => e.error.severity(),
            Self::Dismiss(e) => e.error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "EXECUTE_GAME_OVER",
            Self::OverflowPending => "EXECUTE_OVERFLOW_PENDING",
            Self::Move(e) => e.error.error_code(),
            Self::StartCombat(e) => e.error.error_code(),
            Self::Attack(e) => e.error.error_code(),
            Self::EnemyTurn(e) => e.error.error_code(),
            Self::Flee(e) => e.error.error_code(),
            Self::PlayCard(e) => e.error.error_code(),
            Self::ResolveOverflow(e) => e.error.error_code(),
            Self::ResolveHazard(e) => e.error.error_code(),
            Self::TakeKey(e) => e.error.error_code(),
            Self::Loot(e) => e.error.error_code(),
            Self::RecruitAlly(e) => e.error.error_code(),
            Self::DeclineAlly(e) => e.error.error_code(),
            Self::AdvanceLevel(e) => e.error.error_code(),
            Self::StartBossPhase(e) => e.error.error_code(),
            Self::Equip(e) => e.error.error_code(),
            Self::Unequip(e) => e.error.error_code(),
            Self::Dismiss(e) => e.error.error_code(),
        }
    }
}
