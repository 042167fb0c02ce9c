//! Run initialization errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors that prevent a run from starting.
///
/// This is the only failure allowed to halt the game: once a run exists,
/// every other problem is reported per action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("content lookup failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("entry {0} lies outside the grid")]
    InvalidEntry(Position),

    #[error("opening hand of {requested} exceeds hand capacity {capacity}")]
    OpeningHandTooLarge { requested: usize, capacity: usize },

    #[error("leader must start with at least 1 HP")]
    LeaderWithoutHealth,
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(_) => "INIT_ORACLE",
            Self::InvalidEntry(_) => "INIT_INVALID_ENTRY",
            Self::OpeningHandTooLarge { .. } => "INIT_OPENING_HAND_TOO_LARGE",
            Self::LeaderWithoutHealth => "INIT_LEADER_WITHOUT_HEALTH",
        }
    }
}
