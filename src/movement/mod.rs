//! Movement resolver: recursive push-chain validation and commit.

pub mod resolver;

pub use resolver::move_block;
