//! The property/effect engine.
//!
//! Runs once per frame, before rule recomputation. Properties are
//! visited in declaration order ([`Property::ALL`]); for each property
//! with an effect, every live block currently holding it (from the
//! previous cycle's `IS` assignments) receives the effect.
//!
//! `PUSH`, `STOP` and `MELT` carry no effect of their own — the
//! movement resolver and the `HOT`/`SINK` effects read them.

use crate::board::{BlockIdx, Board};
use crate::core::{Direction, Ident, Property, Text};
use crate::movement;

/// Apply every property effect for this frame.
///
/// `intent` is the frame's pending move direction, consumed by the
/// `YOU` effect; `None` means no movement was requested.
pub fn apply_effects(board: &mut Board, intent: Option<Direction>) {
    for property in Property::ALL {
        // Snapshot the holders first: effects mutate liveness as they go.
        let holders = board.live_with(property);
        for idx in holders {
            apply_one(board, property, idx, intent);
        }
    }
}

fn apply_one(board: &mut Board, property: Property, idx: BlockIdx, intent: Option<Direction>) {
    match property {
        Property::You => {
            if let Some(direction) = intent {
                movement::move_block(board, idx, direction);
            }
        }
        Property::Hot => hot(board, idx),
        Property::Sink => sink(board, idx),
        Property::Defeat => defeat(board, idx),
        Property::Win => win(board, idx),
        Property::Real => real(board, idx),
        Property::Push | Property::Stop | Property::Melt => {}
    }
}

/// Anything meltable sharing this cell dies (the hot block included, if
/// it melts).
fn hot(board: &mut Board, idx: BlockIdx) {
    let position = board.block(idx).position();
    for j in board.live_at(position) {
        if board.block(j).has(Property::Melt) {
            board.block_mut(j).set_dead(true);
        }
    }
}

/// If any other live block shares this cell, everything here drowns,
/// the sinking block included. A sink block alone is inert.
fn sink(board: &mut Board, idx: BlockIdx) {
    let position = board.block(idx).position();
    let here = board.live_at(position);
    if here.iter().any(|&j| j != idx) {
        // `here` includes the sinking block itself.
        for j in here {
            board.block_mut(j).set_dead(true);
        }
    }
}

/// Co-located controlled blocks die.
fn defeat(board: &mut Board, idx: BlockIdx) {
    let position = board.block(idx).position();
    for j in board.live_at(position) {
        if board.block(j).has(Property::You) {
            board.block_mut(j).set_dead(true);
        }
    }
}

/// A co-located controlled block finishes the level.
fn win(board: &mut Board, idx: BlockIdx) {
    let position = board.block(idx).position();
    if board
        .live_at(position)
        .iter()
        .any(|&j| board.block(j).has(Property::You))
    {
        board.set_finished(true);
        log::info!("level won at {position}");
    }
}

/// A noun token holding `REAL` becomes the object it names,
/// independently of any `IS` rule.
fn real(board: &mut Board, idx: BlockIdx) {
    if let Ident::Text(Text::Noun(noun)) = board.block(idx).ident() {
        board.block_mut(idx).replace(noun.object());
    }
}
