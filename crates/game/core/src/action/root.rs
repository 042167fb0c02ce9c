//! Replay commitments.
//!
//! Two runs with the same seed and the same action sequence must agree on
//! both roots. Requires the `serde` feature.

use sha2::{Digest, Sha256};

use super::Action;
use crate::state::GameState;

/// SHA-256 over the bincode encoding of each action, in order.
///
/// Order matters: permuting the actions changes the root.
pub fn compute_actions_root(actions: &[Action]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for action in actions {
        // bincode serialization is deterministic and consistent
        if let Ok(action_bytes) = bincode::serialize(action) {
            hasher.update(&action_bytes);
        }
    }
    hasher.finalize().into()
}

/// SHA-256 over the bincode encoding of the full game state.
pub fn compute_state_root(state: &GameState) -> [u8; 32] {
    let mut hasher = Sha256::new();
    if let Ok(state_bytes) = bincode::serialize(state) {
        hasher.update(&state_bytes);
    }
    hasher.finalize().into()
}
