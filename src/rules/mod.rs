//! The rule engine: sentence extraction, conjunction elimination and
//! operator evaluation.
//!
//! Per frame (when the board is dirty) the pipeline is:
//!
//! 1. [`extract`] reads candidate sentences off the board's text cells.
//! 2. Injected starting rules (and the constant `TEXT IS PUSH` default)
//!    are appended by the session.
//! 3. [`simplify`] eliminates `AND` to a fixed point and deduplicates.
//! 4. [`Evaluator::evaluate`] reduces each sentence against the board,
//!    applying `ON`/`HAS`/`IS` semantics.

pub mod eval;
pub mod extract;
pub mod rule;
pub mod simplify;

pub use eval::Evaluator;
pub use extract::{extract, RULE_MIN_LEN};
pub use rule::Rule;
pub use simplify::simplify;
