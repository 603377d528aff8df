//! Spawner system: feeds enemies onto the field and occasionally drops
//! a bonus.
//!
//! Enemy placement draws from the map's spawn candidates with a bounded
//! number of attempts; when every candidate is blocked the spawn is
//! retried on the next tick rather than forced.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use panzer_core::components::{Bonus, Enemy, Health, Player};
use panzer_core::constants::SPAWN_ATTEMPT_BUDGET;
use panzer_core::enums::{AiBehavior, BonusKind};
use panzer_core::events::GameEvent;
use panzer_core::types::Point;

use crate::access;
use crate::difficulty::DifficultyParams;
use crate::grid::ObstacleGrid;
use crate::world_setup;

/// Remaining enemy budget for the level and the earliest tick the next
/// spawn may happen.
#[derive(Debug, Clone, Copy)]
pub struct SpawnQueue {
    remaining: u32,
    next_spawn_tick: u64,
}

impl SpawnQueue {
    pub fn new(params: &DifficultyParams) -> Self {
        Self {
            remaining: params.enemy_total,
            next_spawn_tick: 0,
        }
    }

    /// Enemies not yet fielded.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[cfg(test)]
    pub(crate) fn consume_one(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    #[cfg(test)]
    pub(crate) fn drain(&mut self) {
        self.remaining = 0;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    grid: &ObstacleGrid,
    params: &DifficultyParams,
    rng: &mut ChaCha8Rng,
    queue: &mut SpawnQueue,
    next_tank_number: &mut u32,
    enemy_spawns: &[Point],
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    spawn_enemy(
        world,
        grid,
        params,
        rng,
        queue,
        next_tank_number,
        enemy_spawns,
        tick,
    );
    spawn_bonus(world, grid, params, rng, events);
}

#[allow(clippy::too_many_arguments)]
fn spawn_enemy(
    world: &mut World,
    grid: &ObstacleGrid,
    params: &DifficultyParams,
    rng: &mut ChaCha8Rng,
    queue: &mut SpawnQueue,
    next_tank_number: &mut u32,
    enemy_spawns: &[Point],
    tick: u64,
) {
    if queue.remaining == 0 || tick < queue.next_spawn_tick {
        return;
    }
    let alive = world.query::<&Enemy>().iter().count() as u32;
    if alive >= params.max_alive {
        return;
    }

    let player_pos = world
        .query::<(&Player, &Health, &Point)>()
        .iter()
        .find(|(_, (_, health, _))| !health.is_dead())
        .map(|(_, (_, _, pos))| *pos);

    for _ in 0..SPAWN_ATTEMPT_BUDGET {
        let candidate = enemy_spawns[rng.gen_range(0..enemy_spawns.len())];
        if !access::is_valid_enemy_position(world, grid, candidate, player_pos) {
            continue;
        }
        let behavior = roll_behavior(params, rng);
        let number = *next_tank_number;
        *next_tank_number += 1;
        world_setup::spawn_enemy(world, candidate, number, behavior);
        queue.remaining -= 1;
        queue.next_spawn_tick = tick + params.spawn_interval_ticks;
        return;
    }
    // All candidates blocked; try again next tick.
}

fn roll_behavior(params: &DifficultyParams, rng: &mut ChaCha8Rng) -> AiBehavior {
    let roll: f64 = rng.gen();
    if roll < params.aggressive_weight {
        AiBehavior::Aggressive
    } else if roll < params.aggressive_weight + params.defensive_weight {
        AiBehavior::Defensive
    } else {
        AiBehavior::Random
    }
}

fn spawn_bonus(
    world: &mut World,
    grid: &ObstacleGrid,
    params: &DifficultyParams,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    if !rng.gen_bool(params.bonus_spawn_chance) {
        return;
    }
    // At most one bonus on the field at a time.
    let active = world.query::<&Bonus>().iter().any(|(_, b)| b.active);
    if active {
        return;
    }

    for _ in 0..SPAWN_ATTEMPT_BUDGET {
        let candidate = Point::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        if !access::is_valid_bonus_position(world, grid, candidate) {
            continue;
        }
        let kind = match rng.gen_range(0..4) {
            0 => BonusKind::Shield,
            1 => BonusKind::RapidFire,
            2 => BonusKind::SpeedBoost,
            _ => BonusKind::ExtraLife,
        };
        world_setup::spawn_bonus(world, candidate, kind, params.bonus_ttl_ticks);
        events.push(GameEvent::BonusSpawned {
            kind,
            at: candidate,
        });
        return;
    }
}
