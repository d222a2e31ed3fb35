//! Frame input: what the driving loop hands the session each frame.
//!
//! The core never polls anything. The driver supplies a move intent
//! (or none) plus any session control requests, gathered however it
//! likes — keyboard, script, test harness.

use serde::{Deserialize, Serialize};

use crate::core::Direction;

/// A session-level control request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlRequest {
    /// Restart the current level from its source.
    Reload,
    /// Mark the current level finished and advance.
    Skip,
    /// Go back one level in the playlist.
    Previous,
    /// End the session.
    Quit,
}

/// Everything the driver supplies for one frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Pending move intent, consumed by the `YOU` effect.
    pub direction: Option<Direction>,
    /// Control requests, handled before gameplay.
    pub controls: Vec<ControlRequest>,
}

impl FrameInput {
    /// An empty frame: no movement, no controls.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A frame carrying only a move intent.
    #[must_use]
    pub fn moving(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            controls: Vec::new(),
        }
    }

    /// A frame carrying only a control request.
    #[must_use]
    pub fn control(request: ControlRequest) -> Self {
        Self {
            direction: None,
            controls: vec![request],
        }
    }
}
