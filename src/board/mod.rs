//! Board system: the block arena for one level.

pub mod block;
#[allow(clippy::module_inception)]
pub mod board;

pub use block::Block;
pub use board::{BlockIdx, Board};
