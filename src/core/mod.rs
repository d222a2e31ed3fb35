//! Core types: the identifier vocabulary and grid math.

pub mod grid;
pub mod vocab;

pub use grid::{Direction, Position};
pub use vocab::{Group, Ident, Noun, Operator, Property, RealObject, Text, Vocabulary};
