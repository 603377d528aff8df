//! Projectile system: moves shells one cell and resolves every
//! collision class.
//!
//! Collisions mark projectiles spent and apply damage; nothing is
//! despawned here. The sweep removes spent shells and anything they
//! killed at the end of the tick.

use hecs::{Entity, World};

use panzer_core::components::{BonusEffects, Health, Obstacle, Player, Projectile};
use panzer_core::constants::DAMAGE_FLASH_TICKS;
use panzer_core::enums::MoverKind;
use panzer_core::events::GameEvent;
use panzer_core::types::Point;

use crate::access;
use crate::grid::ObstacleGrid;

/// One projectile's attempted move this tick.
struct Flight {
    entity: Entity,
    from: Point,
    to: Point,
    owner: Option<u32>,
    /// Stopped by bounds or an obstacle during the movement phase.
    stopped: bool,
}

pub fn run(
    world: &mut World,
    grid: &ObstacleGrid,
    player_number: u32,
    events: &mut Vec<GameEvent>,
    damage_flash: &mut u32,
) {
    // Movement phase: advance each live shell one cell, stopping at
    // the map edge or an impassable obstacle.
    let mut flights: Vec<Flight> = world
        .query::<(&Projectile, &Point)>()
        .iter()
        .filter(|(_, (proj, _))| !proj.spent)
        .map(|(entity, (proj, pos))| Flight {
            entity,
            from: *pos,
            to: pos.translated(proj.facing),
            owner: proj.owner,
            stopped: false,
        })
        .collect();

    for flight in &mut flights {
        if !access::is_valid_position(grid, flight.to) {
            flight.stopped = true;
            continue;
        }
        if !access::is_position_accessible(world, grid, flight.to, MoverKind::Projectile) {
            flight.stopped = true;
            // Bricks take damage from the impact.
            if let Some(obstacle) = grid.obstacle_at(flight.to) {
                damage_obstacle(world, obstacle, flight.owner);
            }
            continue;
        }
        if let Ok(mut pos) = world.get::<&mut Point>(flight.entity) {
            *pos = flight.to;
        }
    }

    // Tank collision phase: a shell entering a tank's cell hits it,
    // unless the tank is the shell's own firer.
    for flight in &mut flights {
        if flight.stopped {
            continue;
        }
        let Some((tank, number)) = access::tank_at(world, flight.to) else {
            continue;
        };
        if flight.owner == Some(number) {
            continue;
        }
        // A tank destroyed this tick is a wreck; shells fly past it.
        let dead = world
            .get::<&Health>(tank)
            .map(|h| h.is_dead())
            .unwrap_or(false);
        if dead {
            continue;
        }
        flight.stopped = true;

        let shielded = world
            .get::<&BonusEffects>(tank)
            .map(|e| e.shielded())
            .unwrap_or(false);
        if shielded {
            continue;
        }

        if let Ok(mut health) = world.get::<&mut Health>(tank) {
            health.hp -= 1;
            health.last_hit_by = flight.owner;
        }
        if number == player_number {
            *damage_flash = DAMAGE_FLASH_TICKS;
            let lives_left = player_lives_after_hit(world, tank);
            events.push(GameEvent::PlayerHit { lives_left });
        }
    }

    // Shell-on-shell phase: two shells in the same cell, or swapping
    // cells in the same tick, annihilate each other.
    for i in 0..flights.len() {
        for j in (i + 1)..flights.len() {
            let collided = {
                let (a, b) = (&flights[i], &flights[j]);
                if a.stopped || b.stopped {
                    false
                } else {
                    a.to == b.to || (a.from == b.to && a.to == b.from)
                }
            };
            if collided {
                flights[i].stopped = true;
                flights[j].stopped = true;
            }
        }
    }

    for flight in &flights {
        if flight.stopped {
            if let Ok(mut proj) = world.get::<&mut Projectile>(flight.entity) {
                proj.spent = true;
            }
        }
    }
}

fn damage_obstacle(world: &World, obstacle: Entity, owner: Option<u32>) {
    let destructible = world
        .get::<&Obstacle>(obstacle)
        .map(|o| o.kind.is_destructible())
        .unwrap_or(false);
    if !destructible {
        return;
    }
    if let Ok(mut health) = world.get::<&mut Health>(obstacle) {
        health.hp -= 1;
        health.last_hit_by = owner;
    }
}

fn player_lives_after_hit(world: &World, tank: Entity) -> u32 {
    let lives = world.get::<&Player>(tank).map(|p| p.lives).unwrap_or(0);
    let dead = world
        .get::<&Health>(tank)
        .map(|h| h.is_dead())
        .unwrap_or(false);
    if dead {
        lives.saturating_sub(1)
    } else {
        lives
    }
}
