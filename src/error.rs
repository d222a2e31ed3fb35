//! Boundary error type.
//!
//! The rule, effect and movement pipelines are total: malformed rule
//! fragments are semantic no-ops, never errors. The only failures are at
//! the I/O boundary — a level source or save record that cannot be
//! parsed — and those are recoverable: the caller's prior state is left
//! untouched.

use thiserror::Error;

/// A recoverable boundary failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The level source text could not be parsed.
    #[error("malformed level source: {0}")]
    MalformedLevel(String),

    /// The save data could not be parsed.
    #[error("malformed save data: {0}")]
    MalformedSave(String),

    /// The save data names a level absent from the session playlist.
    #[error("save data names unknown level {0:?}")]
    UnknownLevel(String),

    /// A session was built with no levels to play.
    #[error("session playlist is empty")]
    EmptyPlaylist,

    /// An underlying read or write failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
