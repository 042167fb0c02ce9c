//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! action flows through the same pipeline:
//!
//! 1. run-level gates (run over, pending hand overflow)
//! 2. `pre_validate → apply → post_validate` of the concrete transition
//! 3. on any error, the state is restored to its pre-action snapshot and the
//!    rejection is logged
//!
//! Rejected actions therefore never leave partial mutations behind, including
//! draws from the RNG stream.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use tracing::{debug, warn};

use crate::action::{Action, ActionResult};
use crate::env::GameEnv;
use crate::error::GameError;
use crate::state::{GameState, LogKind};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Nonce assigned to the executed action.
    pub nonce: u64,
    pub action_result: ActionResult,
}

/// Game engine that executes actions against a borrowed state.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes an action atomically.
    ///
    /// On success the nonce advances. On failure the state is rolled back,
    /// a `Rejected` entry is appended to the log and the error is returned.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let snapshot = self.state.clone();

        match self.gate(action).and_then(|()| transition::execute_transition(action, self.state, &env)) {
            Ok(action_result) => {
                let nonce = self.state.nonce;
                self.state.nonce += 1;
                debug!(nonce, action = action.as_snake_case(), "action executed");
                Ok(ExecutionOutcome {
                    nonce,
                    action_result,
                })
            }
            Err(error) => {
                *self.state = snapshot;
                warn!(
                    action = action.as_snake_case(),
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "action rejected: {error}"
                );
                self.state.record(
                    LogKind::Rejected,
                    format!("{} rejected: {error}", action.as_snake_case()),
                );
                Err(error)
            }
        }
    }

    /// Run-level gates checked before any transition.
    fn gate(&self, action: &Action) -> Result<(), ExecuteError> {
        if self.state.over {
            return Err(ExecuteError::GameOver);
        }
        if self.state.cards.has_pending_overflow() && !matches!(action, Action::ResolveOverflow(_)) {
            return Err(ExecuteError::OverflowPending);
        }
        Ok(())
    }
}
