//! Movement resolution: validating and committing push chains.
//!
//! A move is validated recursively before anything is touched: the
//! whole chain of pushable blocks ahead must be able to advance, or
//! nothing moves. Validation carries a visited set so a chain that
//! cycles back through an already-considered block is treated as
//! blocked rather than recursing forever.
//!
//! On commit, pushable occupants of the destination cell are moved
//! first (depth-first, re-validating as the original cascade does),
//! then the moving block itself, and the board is marked dirty.

use rustc_hash::FxHashSet;

use crate::board::{BlockIdx, Board};
use crate::core::{Direction, Property};

/// Try to move one block (plus any push chain ahead of it).
///
/// Returns `true` and marks the board dirty if the block moved.
pub fn move_block(board: &mut Board, idx: BlockIdx, direction: Direction) -> bool {
    let mut visited = FxHashSet::default();
    if !validate(board, idx, direction, &mut visited) {
        return false;
    }

    push_ahead(board, idx, direction);

    let next = board.block(idx).position().step(direction);
    board.block_mut(idx).set_position(next);
    board.mark_dirty();
    true
}

/// Check whether `idx` can advance one cell.
///
/// Order of checks is significant: bounds, then `STOP` (before push
/// eligibility), then the absence of `PUSH` (non-blocking occupants are
/// overlapped), then recursion over every occupant.
fn validate(
    board: &Board,
    idx: BlockIdx,
    direction: Direction,
    visited: &mut FxHashSet<BlockIdx>,
) -> bool {
    if !visited.insert(idx) {
        // Cyclic chain: treat as blocked.
        return false;
    }

    let next = board.block(idx).position().step(direction);
    if !board.in_bounds(next) {
        return false;
    }

    let occupants = board.live_at(next);
    if occupants.is_empty() {
        return true;
    }
    if occupants.iter().any(|&j| board.block(j).has(Property::Stop)) {
        return false;
    }
    if occupants.iter().all(|&j| !board.block(j).has(Property::Push)) {
        return true;
    }

    occupants
        .iter()
        .all(|&j| validate(board, j, direction, visited))
}

/// Move the pushable occupants of the destination cell out of the way.
///
/// A pushed block that also holds `YOU` is skipped: a controlled block
/// never pushes itself. Each push re-enters `move_block`, so deeper
/// cascades re-validate before moving.
fn push_ahead(board: &mut Board, idx: BlockIdx, direction: Direction) {
    let next = board.block(idx).position().step(direction);
    let pushable: Vec<BlockIdx> = board
        .live_at(next)
        .into_iter()
        .filter(|&j| board.block(j).has(Property::Push) && !board.block(j).has(Property::You))
        .collect();

    for j in pushable {
        move_block(board, j, direction);
    }
}
