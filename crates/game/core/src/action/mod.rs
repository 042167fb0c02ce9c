//! Action domain.
//!
//! Every player decision is an [`Action`] variant wrapping a concrete
//! transition type. Transitions implement [`ActionTransition`] and are
//! grouped by concern:
//!
//! - `movement`: moving between tiles
//! - `combat`: starting fights, attacking, enemy turns, fleeing
//! - `card`: playing cards, resolving hand overflow
//! - `encounter`: hazards, keys, loot, allies
//! - `level`: descending through the door
//! - `boss`: boss phases
//! - `party`: equipment and dismissal

pub mod boss;
pub mod card;
pub mod combat;
pub mod encounter;
pub mod level;
pub mod movement;
pub mod party;
#[cfg(feature = "serde")]
mod root;

pub use boss::{BossError, BossPhaseOutcome, StartBossPhaseAction};
pub use card::{CardError, CardOutcome, OverflowError, PlayCardAction, ResolveOverflowAction};
pub use combat::{
    AttackAction, AttackOutcome, CombatError, EnemyTurnAction, EnemyTurnEvent, EnemyTurnOutcome,
    FleeAction, FleeOutcome, StartCombatAction,
};
pub use encounter::{
    DeclineAllyAction, EncounterError, HazardOutcome, LootAction, LootOutcome, RecruitAllyAction,
    ResolveHazardAction, TakeKeyAction,
};
pub use level::{AdvanceLevelAction, LevelError, LevelOutcome};
pub use movement::{MoveAction, MoveError, MoveOutcome};
pub use party::{DismissAction, EquipAction, PartyError, UnequipAction};
#[cfg(feature = "serde")]
pub use root::{compute_actions_root, compute_state_root};

use crate::env::{EquipSlot, GameEnv};
use crate::state::{CardId, GameState, MemberId, Position};

/// Defines how a concrete action variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks
/// receive read-only access to content via `Env` and must stay side-effect
/// free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Top-level player decision.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    StartCombat(StartCombatAction),
    Attack(AttackAction),
    EnemyTurn(EnemyTurnAction),
    Flee(FleeAction),
    PlayCard(PlayCardAction),
    ResolveOverflow(ResolveOverflowAction),
    ResolveHazard(ResolveHazardAction),
    TakeKey(TakeKeyAction),
    Loot(LootAction),
    RecruitAlly(RecruitAllyAction),
    DeclineAlly(DeclineAllyAction),
    AdvanceLevel(AdvanceLevelAction),
    StartBossPhase(StartBossPhaseAction),
    Equip(EquipAction),
    Unequip(UnequipAction),
    Dismiss(DismissAction),
}

impl Action {
    pub fn move_to(target: Position) -> Self {
        Self::Move(MoveAction::new(target))
    }

    pub fn start_combat() -> Self {
        Self::StartCombat(StartCombatAction::default())
    }

    pub fn start_combat_with(enemy: impl Into<String>) -> Self {
        Self::StartCombat(StartCombatAction::against(enemy))
    }

    pub fn attack() -> Self {
        Self::Attack(AttackAction)
    }

    pub fn enemy_turn() -> Self {
        Self::EnemyTurn(EnemyTurnAction)
    }

    pub fn flee() -> Self {
        Self::Flee(FleeAction)
    }

    pub fn play_card(card: CardId) -> Self {
        Self::PlayCard(PlayCardAction::new(card))
    }

    pub fn resolve_overflow(discard: CardId) -> Self {
        Self::ResolveOverflow(ResolveOverflowAction::new(discard))
    }

    pub fn resolve_hazard() -> Self {
        Self::ResolveHazard(ResolveHazardAction)
    }

    pub fn take_key() -> Self {
        Self::TakeKey(TakeKeyAction)
    }

    pub fn loot() -> Self {
        Self::Loot(LootAction)
    }

    pub fn recruit_ally() -> Self {
        Self::RecruitAlly(RecruitAllyAction)
    }

    pub fn decline_ally() -> Self {
        Self::DeclineAlly(DeclineAllyAction)
    }

    pub fn advance_level() -> Self {
        Self::AdvanceLevel(AdvanceLevelAction)
    }

    pub fn start_boss_phase() -> Self {
        Self::StartBossPhase(StartBossPhaseAction)
    }

    pub fn equip(member: MemberId, item: impl Into<String>) -> Self {
        Self::Equip(EquipAction::new(member, item))
    }

    pub fn unequip(member: MemberId, slot: EquipSlot) -> Self {
        Self::Unequip(UnequipAction::new(member, slot))
    }

    pub fn dismiss(member: MemberId) -> Self {
        Self::Dismiss(DismissAction::new(member))
    }

    /// Returns the snake_case name of the action.
    ///
    /// Used for logging and replay file keys.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::StartCombat(_) => "start_combat",
            Action::Attack(_) => "attack",
            Action::EnemyTurn(_) => "enemy_turn",
            Action::Flee(_) => "flee",
            Action::PlayCard(_) => "play_card",
            Action::ResolveOverflow(_) => "resolve_overflow",
            Action::ResolveHazard(_) => "resolve_hazard",
            Action::TakeKey(_) => "take_key",
            Action::Loot(_) => "loot",
            Action::RecruitAlly(_) => "recruit_ally",
            Action::DeclineAlly(_) => "decline_ally",
            Action::AdvanceLevel(_) => "advance_level",
            Action::StartBossPhase(_) => "start_boss_phase",
            Action::Equip(_) => "equip",
            Action::Unequip(_) => "unequip",
            Action::Dismiss(_) => "dismiss",
        }
    }
}

/// Action-specific execution result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Move(MoveOutcome),
    /// Combat began against the enemy with this template id.
    StartCombat { enemy: String },
    Attack(AttackOutcome),
    EnemyTurn(EnemyTurnOutcome),
    Flee(FleeOutcome),
    PlayCard(CardOutcome),
    ResolveOverflow,
    ResolveHazard(HazardOutcome),
    TakeKey,
    Loot(LootOutcome),
    RecruitAlly { member: MemberId },
    DeclineAlly,
    AdvanceLevel(LevelOutcome),
    StartBossPhase(BossPhaseOutcome),
    Equip,
    Unequip,
    Dismiss,
}
