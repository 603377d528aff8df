//! Game state snapshot — the complete visible state handed to the
//! renderer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{BonusKind, Direction, GamePhase, ObstacleKind, TankKind};
use crate::events::GameEvent;
use crate::types::{Point, SimTime};

/// Complete renderable state produced by `advance()` each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    /// Player took damage within the last few ticks.
    pub damage_flash: bool,
    pub tanks: Vec<TankView>,
    pub projectiles: Vec<ProjectileView>,
    pub obstacles: Vec<ObstacleView>,
    pub bonuses: Vec<BonusView>,
    pub explosions: Vec<ExplosionView>,
    /// Events emitted during this tick, in order.
    pub events: Vec<GameEvent>,
}

/// A live tank on the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankView {
    /// Stable tank number.
    pub id: u32,
    pub kind: TankKind,
    pub position: Point,
    pub facing: Direction,
    /// Currently invulnerable (player shield bonus or respawn grace).
    pub shielded: bool,
}

/// A shell in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Point,
    pub facing: Direction,
}

/// A terrain obstacle cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub position: Point,
    pub kind: ObstacleKind,
}

/// A pickup waiting on the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusView {
    pub position: Point,
    pub kind: BonusKind,
}

/// A fading explosion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Point,
}
