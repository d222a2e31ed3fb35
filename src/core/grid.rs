//! Grid math: positions and movement directions.
//!
//! The board is a fixed-size integer grid. Positions use `i32` so that
//! stepping off the left or top edge produces an ordinary out-of-bounds
//! value instead of an underflow.

use serde::{Deserialize, Serialize};

/// A cell position (or a board size) on the grid.
///
/// ```
/// use gridspell::core::{Direction, Position};
///
/// let p = Position::new(2, 3);
/// assert_eq!(p.step(Direction::Right), Position::new(3, 3));
/// assert_eq!(p.step(Direction::Up), Position::new(2, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a position from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one cell over in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four cardinal movement directions.
///
/// "No movement" is `Option::<Direction>::None` at the input boundary;
/// the resolver is never invoked without a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The `(dx, dy)` cell offset of this direction.
    ///
    /// `Up` decreases `y`: the grid origin is the top-left corner,
    /// matching the level text format (first row is `y = 0`).
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}
