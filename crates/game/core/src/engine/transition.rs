//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the result in
/// [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    let result = match action {
        Action::Move(t) => ActionResult::Move(drive_transition(t, state, env).map_err(ExecuteError::Move)?),
        Action::StartCombat(t) => ActionResult::StartCombat {
            enemy: drive_transition(t, state, env).map_err(ExecuteError::StartCombat)?,
        },
        Action::Attack(t) => {
            ActionResult::Attack(drive_transition(t, state, env).map_err(ExecuteError::Attack)?)
        }
        Action::EnemyTurn(t) => {
            ActionResult::EnemyTurn(drive_transition(t, state, env).map_err(ExecuteError::EnemyTurn)?)
        }
        Action::Flee(t) => ActionResult::Flee(drive_transition(t, state, env).map_err(ExecuteError::Flee)?),
        Action::PlayCard(t) => {
            ActionResult::PlayCard(drive_transition(t, state, env).map_err(ExecuteError::PlayCard)?)
        }
        Action::ResolveOverflow(t) => {
            drive_transition(t, state, env).map_err(ExecuteError::ResolveOverflow)?;
            ActionResult::ResolveOverflow
        }
        Action::ResolveHazard(t) => ActionResult::ResolveHazard(
            drive_transition(t, state, env).map_err(ExecuteError::ResolveHazard)?,
        ),
        Action::TakeKey(t) => {
            drive_transition(t, state, env).map_err(ExecuteError::TakeKey)?;
            ActionResult::TakeKey
        }
        Action::Loot(t) => ActionResult::Loot(drive_transition(t, state, env).map_err(ExecuteError::Loot)?),
        Action::RecruitAlly(t) => ActionResult::RecruitAlly {
            member: drive_transition(t, state, env).map_err(ExecuteError::RecruitAlly)?,
        },
        Action::DeclineAlly(t) => {
            drive_transition(t, state, env).map_err(ExecuteError::DeclineAlly)?;
            ActionResult::DeclineAlly
        }
        Action::AdvanceLevel(t) => ActionResult::AdvanceLevel(
            drive_transition(t, state, env).map_err(ExecuteError::AdvanceLevel)?,
        ),
        Action::StartBossPhase(t) => ActionResult::StartBossPhase(
            drive_transition(t, state, env).map_err(ExecuteError::StartBossPhase)?,
        ),
        Action::Equip(t) => {
            drive_transition(t, state, env).map_err(ExecuteError::Equip)?;
            ActionResult::Equip
        }
        Action::Unequip(t) => {
            drive_transition(t, state, env).map_err(ExecuteError::Unequip)?;
            ActionResult::Unequip
        }
        Action::Dismiss(t) => {
            drive_transition(t, state, env).map_err(ExecuteError::Dismiss)?;
            ActionResult::Dismiss
        }
    };
    Ok(result)
}
