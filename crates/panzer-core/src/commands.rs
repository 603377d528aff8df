//! Player commands fed to the simulation, one per tick.
//!
//! The input layer translates raw key events into this neutral enum;
//! no key codes reach the simulation core.

use serde::{Deserialize, Serialize};

/// The player's intent for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    #[default]
    None,
}
