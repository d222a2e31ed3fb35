//! Session layer: level formats, frame input and the game session
//! context the driving loop talks to.

pub mod input;
pub mod level;
pub mod save;
#[allow(clippy::module_inception)]
pub mod session;

pub use input::{ControlRequest, FrameInput};
pub use level::{parse_level, LevelSource};
pub use save::{read_save, write_save, SaveData, SEPARATOR};
pub use session::{FrameOutcome, Session, SessionBuilder};
