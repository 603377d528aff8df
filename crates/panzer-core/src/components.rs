//! ECS components for world entities.
//!
//! Components are plain data structs with no game logic; systems in
//! the sim crate own the behavior. `Point` doubles as the position
//! component. Entities never hold direct references to each other —
//! cross-entity links go through stable `TankId` numbers.

use serde::{Deserialize, Serialize};

use crate::enums::{AiBehavior, BonusKind, Direction, ObstacleKind};

/// Stable tank identifier, assigned by the engine at spawn.
/// Projectiles carry their owner's number; a resolve miss after the
/// owner died is an unattributed kill, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankId(pub u32);

/// Facing direction of a tank or projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facing(pub Direction);

/// Hit points plus attribution of the last damaging shot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    /// Tank number of the last tank whose projectile damaged this
    /// entity, for kill attribution during the sweep.
    pub last_hit_by: Option<u32>,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self {
            hp,
            last_hit_by: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Fire cooldown state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FireControl {
    /// Ticks until the tank may fire again.
    pub cooldown: u32,
}

/// Marks the player tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub lives: u32,
    /// Ticks until the tank may move again.
    pub move_cooldown: u32,
    /// Destroyed with lives left, waiting for a clear spawn cell. The
    /// wreck stays on the field until the sweep can place it back.
    pub awaiting_respawn: bool,
}

/// Active timed bonus effects on the player, in remaining ticks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BonusEffects {
    pub shield: u32,
    pub rapid_fire: u32,
    pub speed_boost: u32,
}

impl BonusEffects {
    pub fn shielded(&self) -> bool {
        self.shield > 0
    }
}

/// Marks an enemy tank and its decision policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub behavior: AiBehavior,
    /// Ticks until the tank may move again.
    pub move_cooldown: u32,
}

/// A fired shell, moving one cell per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub facing: Direction,
    /// Owning tank's stable number at fire time.
    pub owner: Option<u32>,
    /// Consumed by a collision this tick; removed at the sweep.
    pub spent: bool,
}

/// Static terrain obstacle occupying one grid cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
}

/// A pickup waiting on the field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    /// Ticks until the bonus disappears unclaimed.
    pub ttl: u32,
    /// Cleared on pickup or timeout; removed at the sweep.
    pub active: bool,
}

/// Purely visual destruction marker; interacts with nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    /// Remaining ticks to display.
    pub remaining: u32,
}
