//! Property effects: the per-frame behaviors properties confer.

pub mod engine;

pub use engine::apply_effects;
