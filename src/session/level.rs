//! Level text format.
//!
//! Line 1 is `columns,rows`. Every following line is one board row of
//! comma-separated token names; empty fields are skipped, unknown
//! tokens are ignored, and tokens landing outside the declared bounds
//! are dropped. A malformed header is the only hard failure.

use serde::{Deserialize, Serialize};

use crate::board::{Block, Board};
use crate::core::{Position, Vocabulary};
use crate::error::EngineError;

/// A named level source: the display name plus the raw level text.
///
/// The driver owns file discovery; the session only sees these.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelSource {
    pub name: String,
    pub text: String,
}

impl LevelSource {
    /// Pair a display name with level text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Parse level text into a fresh board.
///
/// On failure no board is produced; the caller's state is untouched.
pub fn parse_level(vocab: &Vocabulary, source: &str) -> Result<Board, EngineError> {
    let mut lines = source.lines();

    let header = lines
        .next()
        .ok_or_else(|| EngineError::MalformedLevel("empty source".into()))?;
    let size = parse_header(header)?;
    let mut board = Board::new(size);

    for (y, line) in lines.enumerate() {
        for (x, token) in line.split(',').enumerate() {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let Some(ident) = vocab.lookup(token) else {
                log::debug!("ignoring unknown token {token:?} at ({x}, {y})");
                continue;
            };
            let position = Position::new(x as i32, y as i32);
            if board.in_bounds(position) {
                board.add(Block::new(ident, position));
            } else {
                log::debug!("dropping out-of-bounds token {token:?} at {position}");
            }
        }
    }

    log::info!(
        "level parsed: {}x{} cells, {} blocks",
        size.x,
        size.y,
        board.blocks().len()
    );
    Ok(board)
}

fn parse_header(header: &str) -> Result<Position, EngineError> {
    let mut parts = header.split(',');
    let columns = parse_dim(parts.next(), header)?;
    let rows = parse_dim(parts.next(), header)?;
    if columns <= 0 || rows <= 0 {
        return Err(EngineError::MalformedLevel(format!(
            "non-positive dimensions in header {header:?}"
        )));
    }
    Ok(Position::new(columns, rows))
}

fn parse_dim(part: Option<&str>, header: &str) -> Result<i32, EngineError> {
    part.map(str::trim)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| EngineError::MalformedLevel(format!("bad size header {header:?}")))
}
