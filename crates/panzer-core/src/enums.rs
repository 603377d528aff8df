//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Facing / movement direction on the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-cell offset for this direction.
    pub fn delta(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Terrain obstacle kind. Capability queries are fixed per kind;
/// the world engine consults them for movement and projectile
/// collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Brick wall: one projectile hit destroys it.
    Brick,
    /// Steel wall: indestructible, blocks everything.
    Steel,
    /// Water: impassable to tanks, projectiles fly over it.
    Water,
    /// Forest: tanks drive through it, projectiles pass; hides tanks
    /// from the renderer only.
    Forest,
}

impl ObstacleKind {
    pub fn is_destructible(self) -> bool {
        matches!(self, ObstacleKind::Brick)
    }

    /// Obstacles never move.
    pub fn is_movable(self) -> bool {
        false
    }

    /// May a tank occupy a cell holding this obstacle?
    pub fn is_passable(self) -> bool {
        matches!(self, ObstacleKind::Forest)
    }

    /// May a projectile enter this cell without colliding?
    pub fn is_projectile_passable(self) -> bool {
        matches!(self, ObstacleKind::Water | ObstacleKind::Forest)
    }

    /// May a line of fire be traced through this cell?
    pub fn is_projectile_transparent(self) -> bool {
        matches!(self, ObstacleKind::Water | ObstacleKind::Forest)
    }
}

/// Pickup bonus kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Temporary invulnerability.
    Shield,
    /// Temporarily halved fire cooldown.
    RapidFire,
    /// Temporarily faster movement.
    SpeedBoost,
    /// One extra life, applied immediately.
    ExtraLife,
}

/// Enemy tank decision policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Wanders and fires at random.
    #[default]
    Random,
    /// Closes on the player and fires when aligned.
    Aggressive,
    /// Keeps its distance, fires when aligned.
    Defensive,
}

/// Kind of entity attempting to enter a cell, for accessibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoverKind {
    Tank,
    Projectile,
}

/// Top-level simulation phase for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    /// All enemies destroyed and none left to spawn.
    LevelComplete,
    /// Player destroyed with no lives remaining.
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Active
    }
}

/// Entity kind tag carried by snapshot tank views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankKind {
    Player,
    Enemy,
}
