//! Enemy system: runs the decision policy for each enemy tank and
//! applies the results.
//!
//! Enemies act sequentially in spawn order so that occupancy checks
//! see earlier movers' new positions. A blocked advance re-rolls the
//! facing so tanks do not grind against walls forever.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use panzer_core::components::{Enemy, Facing, FireControl, Health, Player, TankId};
use panzer_core::constants::ENEMY_RELOAD_TICKS;
use panzer_core::enums::{Direction, MoverKind};
use panzer_core::events::GameEvent;
use panzer_core::types::Point;

use panzer_ai::{decide, AiContext};

use crate::access;
use crate::difficulty::DifficultyParams;
use crate::grid::ObstacleGrid;
use crate::world_setup;

pub fn run(
    world: &mut World,
    grid: &ObstacleGrid,
    params: &DifficultyParams,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let player_pos = world
        .query::<(&Player, &Health, &Point)>()
        .iter()
        .find(|(_, (_, health, _))| !health.is_dead())
        .map(|(_, (_, _, pos))| *pos);

    let mut enemies: Vec<(Entity, u32)> = world
        .query::<(&Enemy, &TankId)>()
        .iter()
        .map(|(entity, (_, id))| (entity, id.0))
        .collect();
    enemies.sort_by_key(|&(_, number)| number);

    for (entity, number) in enemies {
        let Ok(snapshot) = world
            .query_one_mut::<(&Enemy, &Point, &Facing, &Health)>(entity)
            .map(|(enemy, pos, facing, health)| (*enemy, *pos, facing.0, health.is_dead()))
        else {
            continue;
        };
        let (enemy, position, facing, dead) = snapshot;
        if dead {
            continue;
        }

        let clear_shot = player_pos
            .and_then(|player| access::clear_shot_direction(world, grid, position, player));
        let ctx = AiContext {
            behavior: enemy.behavior,
            position,
            facing,
            player: player_pos,
            clear_shot,
            fire_chance: params.enemy_fire_chance,
            turn_chance: params.enemy_turn_chance,
        };
        let decision = decide(&ctx, rng);

        let mut facing = facing;
        if let Some(dir) = decision.turn {
            facing = dir;
            if let Ok(mut f) = world.get::<&mut Facing>(entity) {
                f.0 = dir;
            }
        }

        if decision.advance && enemy.move_cooldown == 0 {
            let target = position.translated(facing);
            if access::is_position_accessible(world, grid, target, MoverKind::Tank) {
                if let Ok(mut pos) = world.get::<&mut Point>(entity) {
                    *pos = target;
                }
            } else {
                // Blocked: pick a new facing at random for the next try.
                let dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
                facing = dir;
                if let Ok(mut f) = world.get::<&mut Facing>(entity) {
                    f.0 = dir;
                }
            }
            if let Ok(mut e) = world.get::<&mut Enemy>(entity) {
                e.move_cooldown = params.enemy_move_period;
            }
        }

        if decision.fire {
            let ready = world
                .get::<&FireControl>(entity)
                .map(|f| f.cooldown == 0)
                .unwrap_or(false);
            if ready {
                let fire_pos = world.get::<&Point>(entity).map(|p| *p).unwrap_or(position);
                if let Ok(mut fire) = world.get::<&mut FireControl>(entity) {
                    fire.cooldown = ENEMY_RELOAD_TICKS;
                }
                world_setup::spawn_projectile(world, fire_pos, facing, Some(number));
                events.push(GameEvent::ProjectileFired { by_player: false });
            }
        }
    }
}
