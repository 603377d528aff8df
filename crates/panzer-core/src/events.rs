//! Events emitted by the simulation during a tick.
//!
//! The app consumes these for the score table and status line; the
//! simulation itself never reads them back.

use serde::{Deserialize, Serialize};

use crate::enums::BonusKind;
use crate::types::Point;

/// Something notable that happened this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A tank fired a shell.
    ProjectileFired { by_player: bool },
    /// An enemy tank was destroyed. `points` is zero for kills the
    /// player cannot be credited with (crossfire, dead owner).
    EnemyDestroyed { at: Point, points: u32 },
    /// A destructible obstacle was shot away.
    ObstacleDestroyed { at: Point },
    /// A bonus appeared on the field.
    BonusSpawned { kind: BonusKind, at: Point },
    /// The player picked up a bonus.
    BonusCollected { kind: BonusKind, points: u32 },
    /// The player tank took a hit (shield absorbs silently).
    PlayerHit { lives_left: u32 },
    /// All enemies destroyed and none left to spawn.
    LevelCleared { points: u32 },
    /// The player's last life is gone.
    GameOver,
}
