//! Passability, occupancy, and spawn-validity queries.
//!
//! Free functions over the world and grid so that systems and the
//! engine's public accessors share one implementation. All queries are
//! read-only; out-of-bounds positions are simply "not accessible".

use hecs::{Entity, World};

use panzer_core::components::{Bonus, Obstacle, TankId};
use panzer_core::constants::ENEMY_SPAWN_MIN_PLAYER_DIST;
use panzer_core::enums::{Direction, MoverKind};
use panzer_core::types::Point;

use crate::grid::ObstacleGrid;

/// True iff `p` lies within map bounds.
pub fn is_valid_position(grid: &ObstacleGrid, p: Point) -> bool {
    grid.in_bounds(p)
}

/// May an entity of `kind` move into `p`? Composes map bounds,
/// obstacle capability, and tank occupancy.
pub fn is_position_accessible(world: &World, grid: &ObstacleGrid, p: Point, kind: MoverKind) -> bool {
    if !grid.in_bounds(p) {
        return false;
    }
    if let Some(entity) = grid.obstacle_at(p) {
        let passable = world
            .get::<&Obstacle>(entity)
            .map(|o| match kind {
                MoverKind::Tank => o.kind.is_passable(),
                MoverKind::Projectile => o.kind.is_projectile_passable(),
            })
            .unwrap_or(true);
        if !passable {
            return false;
        }
    }
    if kind == MoverKind::Tank && tank_at(world, p).is_some() {
        return false;
    }
    true
}

/// First tank occupying `p`, with its stable number.
pub fn tank_at(world: &World, p: Point) -> Option<(Entity, u32)> {
    world
        .query::<(&TankId, &Point)>()
        .iter()
        .find(|(_, (_, pos))| **pos == p)
        .map(|(entity, (id, _))| (entity, id.0))
}

fn bonus_at(world: &World, p: Point) -> bool {
    world
        .query::<(&Bonus, &Point)>()
        .iter()
        .any(|(_, (bonus, pos))| bonus.active && *pos == p)
}

/// Spawn-time check for an enemy: empty passable cell, clear of tanks
/// and bonuses, and not too close to the player.
pub fn is_valid_enemy_position(
    world: &World,
    grid: &ObstacleGrid,
    p: Point,
    player_pos: Option<Point>,
) -> bool {
    if !grid.in_bounds(p) || grid.obstacle_at(p).is_some() {
        return false;
    }
    if tank_at(world, p).is_some() || bonus_at(world, p) {
        return false;
    }
    match player_pos {
        Some(player) => p.manhattan_distance(player) >= ENEMY_SPAWN_MIN_PLAYER_DIST,
        None => true,
    }
}

/// Spawn-time check for a bonus: empty cell, clear of tanks and other
/// bonuses.
pub fn is_valid_bonus_position(world: &World, grid: &ObstacleGrid, p: Point) -> bool {
    grid.in_bounds(p)
        && grid.obstacle_at(p).is_none()
        && tank_at(world, p).is_none()
        && !bonus_at(world, p)
}

/// Direction of an axis-aligned, unobstructed firing lane from `from`
/// to `target`, if one exists. Cells strictly between the two must all
/// be projectile-transparent.
pub fn clear_shot_direction(
    world: &World,
    grid: &ObstacleGrid,
    from: Point,
    target: Point,
) -> Option<Direction> {
    let dir = if from.x == target.x && from.y != target.y {
        if target.y > from.y {
            Direction::Down
        } else {
            Direction::Up
        }
    } else if from.y == target.y && from.x != target.x {
        if target.x > from.x {
            Direction::Right
        } else {
            Direction::Left
        }
    } else {
        return None;
    };

    let mut p = from.translated(dir);
    while p != target {
        if let Some(entity) = grid.obstacle_at(p) {
            let transparent = world
                .get::<&Obstacle>(entity)
                .map(|o| o.kind.is_projectile_transparent())
                .unwrap_or(true);
            if !transparent {
                return None;
            }
        }
        p = p.translated(dir);
    }
    Some(dir)
}
