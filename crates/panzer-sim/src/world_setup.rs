//! Entity spawn factories for setting up the simulation world.
//!
//! Creates tank, projectile, obstacle, bonus, and explosion entities
//! with appropriate component bundles. Obstacles are registered in the
//! grid as they are spawned.

use hecs::{Entity, World};

use panzer_core::components::*;
use panzer_core::constants::*;
use panzer_core::enums::{AiBehavior, BonusKind, Direction, ObstacleKind};
use panzer_core::types::Point;
use panzer_map::MapDescriptor;

use crate::grid::ObstacleGrid;

/// Populate the world with the map's obstacles and register each one
/// in the grid. Bricks get hit points; everything else has none and
/// can only be removed by level teardown.
pub fn setup_level(world: &mut World, grid: &mut ObstacleGrid, descriptor: &MapDescriptor) {
    for (p, code) in descriptor.cells() {
        let Some(kind) = code.obstacle_kind() else {
            continue;
        };
        let entity = if kind == ObstacleKind::Brick {
            world.spawn((Obstacle { kind }, p, Health::new(1)))
        } else {
            world.spawn((Obstacle { kind }, p))
        };
        grid.set(p, entity);
    }
}

/// Spawn the player tank at its spawn point, facing up. `lives`
/// carries over from the previous level on a fresh engine.
pub fn spawn_player(world: &mut World, position: Point, tank_number: u32, lives: u32) -> Entity {
    world.spawn((
        Player {
            lives,
            move_cooldown: 0,
            awaiting_respawn: false,
        },
        TankId(tank_number),
        position,
        Facing(Direction::Up),
        Health::new(PLAYER_HP),
        FireControl::default(),
        BonusEffects::default(),
    ))
}

/// Spawn an enemy tank, facing down, with its fire cooldown primed so
/// it cannot shoot on its spawn tick.
pub fn spawn_enemy(
    world: &mut World,
    position: Point,
    tank_number: u32,
    behavior: AiBehavior,
) -> Entity {
    world.spawn((
        Enemy {
            behavior,
            move_cooldown: 0,
        },
        TankId(tank_number),
        position,
        Facing(Direction::Down),
        Health::new(ENEMY_HP),
        FireControl {
            cooldown: ENEMY_RELOAD_TICKS,
        },
    ))
}

/// Spawn a projectile at the firing tank's own cell. It leaves the
/// cell during the same tick's projectile phase.
pub fn spawn_projectile(
    world: &mut World,
    position: Point,
    facing: Direction,
    owner: Option<u32>,
) -> Entity {
    world.spawn((
        Projectile {
            facing,
            owner,
            spent: false,
        },
        position,
    ))
}

/// Spawn a bonus pickup with the given time to live.
pub fn spawn_bonus(world: &mut World, position: Point, kind: BonusKind, ttl: u32) -> Entity {
    world.spawn((
        Bonus {
            kind,
            ttl,
            active: true,
        },
        position,
    ))
}

/// Spawn a short-lived explosion marker.
pub fn spawn_explosion(world: &mut World, position: Point) -> Entity {
    world.spawn((
        Explosion {
            remaining: EXPLOSION_TICKS,
        },
        position,
    ))
}
