//! Sweep system: two-phase removal of everything marked during the
//! tick.
//!
//! Earlier systems only mark (spent shells, deactivated bonuses, hp at
//! zero); this system is the single place entities are despawned, so
//! no system ever observes a half-removed entity. Uses a pre-allocated
//! buffer to avoid per-tick allocation. Running the sweep twice in a
//! row is a no-op.

use hecs::{Entity, World};

use panzer_core::components::{
    Bonus, BonusEffects, Enemy, Explosion, Facing, FireControl, Health, Obstacle, Player,
    Projectile,
};
use panzer_core::constants::{PLAYER_HP, RESPAWN_SHIELD_TICKS, SCORE_ENEMY_DESTROYED};
use panzer_core::enums::Direction;
use panzer_core::events::GameEvent;
use panzer_core::types::Point;

use crate::access;
use crate::engine::ScoreState;
use crate::grid::ObstacleGrid;
use crate::world_setup;

pub fn run(
    world: &mut World,
    grid: &mut ObstacleGrid,
    player_spawn: Point,
    player_number: u32,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, proj) in world.query_mut::<&Projectile>() {
        if proj.spent {
            despawn_buffer.push(entity);
        }
    }

    for (entity, bonus) in world.query_mut::<&Bonus>() {
        if !bonus.active {
            despawn_buffer.push(entity);
        }
    }

    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if explosion.remaining == 0 {
            despawn_buffer.push(entity);
        }
    }

    // Destroyed enemies: credit the player only when the killing shot
    // was provably theirs.
    let mut explosions: Vec<Point> = Vec::new();
    for (entity, (_enemy, health, pos)) in world.query_mut::<(&Enemy, &Health, &Point)>() {
        if !health.is_dead() {
            continue;
        }
        let points = if health.last_hit_by == Some(player_number) {
            SCORE_ENEMY_DESTROYED
        } else {
            0
        };
        score.score += points;
        score.enemies_destroyed += 1;
        events.push(GameEvent::EnemyDestroyed { at: *pos, points });
        explosions.push(*pos);
        despawn_buffer.push(entity);
    }

    // Shot-away obstacles release their grid cell.
    for (entity, (_obstacle, health, pos)) in world.query_mut::<(&Obstacle, &Health, &Point)>() {
        if health.is_dead() {
            grid.clear(*pos);
            events.push(GameEvent::ObstacleDestroyed { at: *pos });
            explosions.push(*pos);
            despawn_buffer.push(entity);
        }
    }

    for pos in explosions {
        world_setup::spawn_explosion(world, pos);
    }

    respawn_player(world, grid, player_spawn);

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Consume a life from a dead player tank and, if lives remain, put it
/// back at its spawn point under a grace shield. The life is consumed
/// on the death tick; the teleport waits until the spawn cell is free
/// of other tanks, retrying each sweep. On the last life the tank
/// stays down and terminal evaluation ends the game.
fn respawn_player(world: &mut World, grid: &ObstacleGrid, player_spawn: Point) {
    let Some(entity) = world
        .query::<(&Player, &Health)>()
        .iter()
        .find(|(_, (player, health))| health.is_dead() && player.lives > 0)
        .map(|(entity, _)| entity)
    else {
        return;
    };

    let death_tick = world
        .get::<&Player>(entity)
        .map(|p| !p.awaiting_respawn)
        .unwrap_or(false);
    if death_tick {
        let death_pos = world.get::<&Point>(entity).map(|p| *p).ok();
        if let Some(pos) = death_pos {
            world_setup::spawn_explosion(world, pos);
        }
        if let Ok(mut player) = world.get::<&mut Player>(entity) {
            player.lives -= 1;
            player.awaiting_respawn = true;
        }
    }

    let lives = world.get::<&Player>(entity).map(|p| p.lives).unwrap_or(0);
    if lives == 0 {
        return;
    }

    // An enemy parked on the spawn cell blocks the respawn. The wreck
    // waits where it fell; two tanks never share a cell.
    let spawn_blocked = access::tank_at(world, player_spawn)
        .map(|(occupant, _)| occupant != entity)
        .unwrap_or(false)
        || grid.obstacle_at(player_spawn).is_some();
    if spawn_blocked {
        return;
    }

    let Ok((player, health, pos, facing, fire, effects)) = world.query_one_mut::<(
        &mut Player,
        &mut Health,
        &mut Point,
        &mut Facing,
        &mut FireControl,
        &mut BonusEffects,
    )>(entity) else {
        return;
    };

    *health = Health::new(PLAYER_HP);
    *pos = player_spawn;
    facing.0 = Direction::Up;
    fire.cooldown = 0;
    player.move_cooldown = 0;
    player.awaiting_respawn = false;
    *effects = BonusEffects {
        shield: RESPAWN_SHIELD_TICKS,
        ..BonusEffects::default()
    };
}
