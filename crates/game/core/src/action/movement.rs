use tracing::debug;

use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::grid;
use crate::state::{GameState, LogKind, Position, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("no living leader can act")]
    NoLivingLeader,

    #[error("cannot move while combat is active")]
    InCombat,

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is not adjacent to {origin}")]
    NotAdjacent { origin: Position, destination: Position },

    #[error("current {kind} tile is not completed")]
    TileIncomplete { kind: TileKind },

    #[error("destination {destination} has not been discovered")]
    Undiscovered { destination: Position },

    #[error("player position desync: expected {expected}, found {actual}")]
    PositionDesync { expected: Position, actual: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TileIncomplete { .. } | Self::InCombat => ErrorSeverity::Recoverable,
            Self::NoLivingLeader
            | Self::OutOfBounds { .. }
            | Self::NotAdjacent { .. }
            | Self::Undiscovered { .. } => ErrorSeverity::Validation,
            Self::PositionDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingLeader => "MOVE_NO_LIVING_LEADER",
            Self::InCombat => "MOVE_IN_COMBAT",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::NotAdjacent { .. } => "MOVE_NOT_ADJACENT",
            Self::TileIncomplete { .. } => "MOVE_TILE_INCOMPLETE",
            Self::Undiscovered { .. } => "MOVE_UNDISCOVERED",
            Self::PositionDesync { .. } => "MOVE_POSITION_DESYNC",
        }
    }
}

/// Step onto an orthogonally adjacent, discovered tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub target: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,
    /// Kind of the tile entered.
    pub kind: TileKind,
    /// Tiles discovered by this step.
    pub revealed: Vec<Position>,
}

impl MoveAction {
    pub fn new(target: Position) -> Self {
        Self { target }
    }

    /// Checks every movement rule against `state` without mutating it.
    pub fn check(&self, state: &GameState) -> Result<(), MoveError> {
        if !state.has_living_leader() {
            return Err(MoveError::NoLivingLeader);
        }
        if state.combat_active() {
            return Err(MoveError::InCombat);
        }

        let origin = state.board.player();
        let destination = self.target;
        let Some(tile) = state.board.tile(destination) else {
            return Err(MoveError::OutOfBounds { destination });
        };
        if !origin.is_adjacent(destination) {
            return Err(MoveError::NotAdjacent {
                origin,
                destination,
            });
        }
        if !state.is_tile_completed() {
            return Err(MoveError::TileIncomplete {
                kind: state.current_tile().kind,
            });
        }
        if !tile.discovered() {
            return Err(MoveError::Undiscovered { destination });
        }
        Ok(())
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.check(state)
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let from = state.board.player();
        let to = self.target;

        state.board.set_player(to);
        grid::explore(&mut state.board, to);
        let revealed = grid::reveal_adjacent(&mut state.board, to);

        let tile = state.board.current_tile_mut();
        let kind = tile.kind;
        if kind == TileKind::Empty && !tile.consumed() {
            tile.consume();
        }

        debug!(%from, %to, %kind, revealed = revealed.len(), "moved");
        state.record(LogKind::Info, format!("Entered a {kind} room at {to}."));

        Ok(MoveOutcome {
            from,
            to,
            kind,
            revealed,
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actual = state.board.player();
        if actual == self.target && state.current_tile().explored() {
            Ok(())
        } else {
            Err(MoveError::PositionDesync {
                expected: self.target,
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::Env;
    use crate::state::Board;

    fn state_on(kinds: [TileKind; GameConfig::TILE_COUNT], player: Position) -> GameState {
        let config = GameConfig {
            starting_deck: Vec::new(),
            ..GameConfig::default()
        };
        let mut state = GameState::new_run(1, config, &Env::empty()).unwrap();
        state.board = Board::from_kinds(1, player, kinds);
        grid::explore(&mut state.board, player);
        grid::reveal_adjacent(&mut state.board, player);
        state
    }

    #[test]
    fn rejects_non_adjacent_and_undiscovered_targets() {
        let state = state_on([TileKind::Empty; GameConfig::TILE_COUNT], Position::new(0, 0));
        assert_eq!(
            MoveAction::new(Position::new(1, 1)).check(&state),
            Err(MoveError::NotAdjacent {
                origin: Position::new(0, 0),
                destination: Position::new(1, 1),
            })
        );

        let mut state = state;
        state.board.set_player(Position::new(1, 0));
        assert!(matches!(
            MoveAction::new(Position::new(2, 0)).check(&state),
            Err(MoveError::Undiscovered { .. })
        ));
    }

    #[test]
    fn fresh_fight_tile_blocks_movement() {
        let mut kinds = [TileKind::Empty; GameConfig::TILE_COUNT];
        kinds[0] = TileKind::Fight;
        let state = state_on(kinds, Position::new(0, 0));
        assert_eq!(
            MoveAction::new(Position::new(0, 1)).check(&state),
            Err(MoveError::TileIncomplete {
                kind: TileKind::Fight
            })
        );
    }

    #[test]
    fn moving_onto_empty_tile_consumes_it() {
        let mut state = state_on([TileKind::Empty; GameConfig::TILE_COUNT], Position::new(0, 0));
        let env: GameEnv<'_> = Env::empty();
        let action = MoveAction::new(Position::new(0, 1));
        action.pre_validate(&state, &env).unwrap();
        let outcome = action.apply(&mut state, &env).unwrap();
        action.post_validate(&state, &env).unwrap();

        assert_eq!(outcome.to, Position::new(0, 1));
        assert!(state.current_tile().consumed());
        assert!(state.board.tile(Position::new(0, 2)).unwrap().discovered());
    }
}
