//! # gridspell
//!
//! A grid puzzle engine in which the rules are words placed on the
//! board. Text tokens arranged into sentences (`BABA IS YOU`,
//! `ROCK AND WALL IS PUSH`) are re-parsed whenever the board changes and
//! reprogram, every frame, which objects are controllable, solid,
//! deadly or winning.
//!
//! ## Design Principles
//!
//! 1. **Explicit state, no globals**: the vocabulary registry and the
//!    session context are plain values passed by reference; drivers own
//!    windows, keyboards and files.
//!
//! 2. **Total evaluation**: malformed sentences are semantic no-ops,
//!    never errors. The only fallible paths are the level/save text
//!    boundaries, and those are recoverable.
//!
//! 3. **Single arena**: live and dead blocks share one collection with
//!    a liveness tag; every view (spatial, by identifier, by property)
//!    is computed on demand.
//!
//! ## Frame pipeline
//!
//! Effects first (`YOU` movement, `SINK`/`HOT`/`DEFEAT`/`WIN`/`REAL`),
//! then — only if a position changed — properties are cleared and the
//! rule set is rebuilt: extraction, `AND` elimination, and operator
//! reduction in the fixed order `ON`, `HAS`, `IS`.
//!
//! ## Modules
//!
//! - `core`: identifier vocabulary, grid math
//! - `board`: block arena, queries, dirty/finished flags
//! - `rules`: sentence extraction, conjunction simplifier, evaluator
//! - `effects`: property effect engine
//! - `movement`: recursive push-chain resolver
//! - `session`: level/save formats, frame input, session context

pub mod board;
pub mod core;
pub mod effects;
pub mod error;
pub mod movement;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Direction, Group, Ident, Noun, Operator, Position, Property, RealObject, Text, Vocabulary,
};

pub use crate::board::{Block, BlockIdx, Board};

pub use crate::error::EngineError;

pub use crate::rules::{extract, simplify, Evaluator, Rule, RULE_MIN_LEN};

pub use crate::effects::apply_effects;

pub use crate::movement::move_block;

pub use crate::session::{
    ControlRequest, FrameInput, FrameOutcome, LevelSource, Session, SessionBuilder,
};
