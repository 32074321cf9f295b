//! Session state machine.
//!
//! ```text
//! NotStarted -> Playing <-> Paused
//!                  |          |
//!                  v          v
//!               GameOver -(restart)-> Playing
//! ```

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Playing,
    Paused,
    GameOver,
}
