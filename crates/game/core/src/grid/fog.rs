//! Fog of war.
//!
//! Tiles move hidden → discovered → explored and never back. Discovery
//! spreads one step from every tile the player stands on.

use crate::rng::RngStream;
use crate::state::{Board, Position};

/// Discovers every in-bounds orthogonal neighbour of `position` that is not
/// explored yet. Returns the positions that were hidden before the call.
pub fn reveal_adjacent(board: &mut Board, position: Position) -> Vec<Position> {
    let mut revealed = Vec::new();
    for neighbor in position.neighbors() {
        let Some(tile) = board.tile_mut(neighbor) else {
            continue;
        };
        if tile.explored() {
            continue;
        }
        if !tile.discovered() {
            revealed.push(neighbor);
        }
        tile.discover();
    }
    revealed
}

/// Marks `position` explored (and discovered). Idempotent.
pub fn explore(board: &mut Board, position: Position) {
    if let Some(tile) = board.tile_mut(position) {
        tile.explore();
    }
}

/// Discovers up to `count` hidden tiles chosen uniformly by the RNG.
pub fn reveal_hidden(board: &mut Board, rng: &mut RngStream, count: u32) -> Vec<Position> {
    let mut revealed = Vec::new();
    for _ in 0..count {
        let hidden = board.hidden_positions();
        let Some(&target) = rng.pick(&hidden) else {
            break;
        };
        if let Some(tile) = board.tile_mut(target) {
            tile.discover();
        }
        revealed.push(target);
    }
    revealed
}
