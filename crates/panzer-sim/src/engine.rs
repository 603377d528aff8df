//! Game engine — the core of the simulation.
//!
//! `GameEngine` owns the hecs ECS world, applies one player command per
//! tick, runs all systems in a fixed order, and produces
//! `GameStateSnapshot`s. Completely headless (no terminal dependency),
//! enabling deterministic testing.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use panzer_core::commands::Command;
use panzer_core::components::Player;
use panzer_core::constants::{PLAYER_LIVES, SCORE_LEVEL_CLEARED};
use panzer_core::enums::{GamePhase, MoverKind};
use panzer_core::events::GameEvent;
use panzer_core::state::GameStateSnapshot;
use panzer_core::types::{Point, SimTime};
use panzer_map::MapDescriptor;
use serde::{Deserialize, Serialize};

use crate::access;
use crate::difficulty::DifficultyParams;
use crate::grid::ObstacleGrid;
use crate::systems;
use crate::systems::spawner::SpawnQueue;
use crate::world_setup;

/// Configuration for starting a new engine. `lives` and `score` carry
/// state across levels; a fresh game uses the defaults.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// 1-based level number.
    pub level: u32,
    pub lives: u32,
    pub score: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            level: 1,
            lives: PLAYER_LIVES,
            score: 0,
        }
    }
}

/// Running score tally.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub enemies_destroyed: u32,
    pub bonuses_collected: u32,
}

/// The simulation engine. Owns the ECS world and all sim state for one
/// level.
pub struct GameEngine {
    world: World,
    grid: ObstacleGrid,
    params: DifficultyParams,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    level: u32,
    score: ScoreState,
    spawn_queue: SpawnQueue,
    player_spawn: Point,
    enemy_spawns: Vec<Point>,
    player_number: u32,
    next_tank_number: u32,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    damage_flash: u32,
}

impl GameEngine {
    /// Build the world for one level from a validated map.
    pub fn new(descriptor: &MapDescriptor, params: DifficultyParams, config: SimConfig) -> Self {
        let mut world = World::new();
        let mut grid = ObstacleGrid::new(descriptor.width, descriptor.height);
        world_setup::setup_level(&mut world, &mut grid, descriptor);

        let player_number = 0;
        world_setup::spawn_player(
            &mut world,
            descriptor.player_spawn,
            player_number,
            config.lives,
        );

        Self {
            world,
            grid,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            level: config.level,
            score: ScoreState {
                score: config.score,
                ..ScoreState::default()
            },
            spawn_queue: SpawnQueue::new(&params),
            player_spawn: descriptor.player_spawn,
            enemy_spawns: descriptor.enemy_spawns.clone(),
            player_number,
            next_tank_number: player_number + 1,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            damage_flash: 0,
            params,
        }
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. Commands targeting inaccessible cells are ignored
    /// silently; in a terminal phase the world is frozen and only the
    /// snapshot is rebuilt.
    pub fn advance(&mut self, dt_secs: f64, command: Command) -> GameStateSnapshot {
        if self.phase == GamePhase::Active {
            self.damage_flash = self.damage_flash.saturating_sub(1);
            self.run_systems(command);
            self.evaluate_terminal();
            self.time.advance(dt_secs);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.time,
            self.phase,
            self.level,
            &self.score,
            self.damage_flash > 0,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Lives remaining on the player tank, zero once it is gone.
    pub fn lives(&self) -> u32 {
        self.world
            .query::<&Player>()
            .iter()
            .next()
            .map(|(_, player)| player.lives)
            .unwrap_or(0)
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Map-bounds check.
    pub fn is_valid_position(&self, p: Point) -> bool {
        access::is_valid_position(&self.grid, p)
    }

    /// May an entity of `kind` move into `p`?
    pub fn is_position_accessible(&self, p: Point, kind: MoverKind) -> bool {
        access::is_position_accessible(&self.world, &self.grid, p, kind)
    }

    /// Spawn-time validity for an enemy tank at `p`.
    pub fn is_valid_enemy_position(&self, p: Point) -> bool {
        access::is_valid_enemy_position(&self.world, &self.grid, p, self.player_position())
    }

    /// Spawn-time validity for a bonus at `p`.
    pub fn is_valid_bonus_position(&self, p: Point) -> bool {
        access::is_valid_bonus_position(&self.world, &self.grid, p)
    }

    fn player_position(&self) -> Option<Point> {
        self.world
            .query::<(&Player, &Point)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| *pos)
    }

    /// Run all systems in order.
    fn run_systems(&mut self, command: Command) {
        // 1. Timers (cooldowns, effect durations, TTLs)
        systems::timers::run(&mut self.world);
        // 2. Player command (turn/move or fire)
        systems::player::run(
            &mut self.world,
            &self.grid,
            command,
            self.player_number,
            &mut self.events,
        );
        // 3. Enemy decisions and actions
        systems::enemy::run(
            &mut self.world,
            &self.grid,
            &self.params,
            &mut self.rng,
            &mut self.events,
        );
        // 4. Projectile movement and collision
        systems::projectiles::run(
            &mut self.world,
            &self.grid,
            self.player_number,
            &mut self.events,
            &mut self.damage_flash,
        );
        // 5. Bonus pickup
        systems::bonuses::run(&mut self.world, &mut self.score, &mut self.events);
        // 6. Sweep removal (and player respawn)
        systems::sweep::run(
            &mut self.world,
            &mut self.grid,
            self.player_spawn,
            self.player_number,
            &mut self.score,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 7. Enemy and bonus spawning
        systems::spawner::run(
            &mut self.world,
            &self.grid,
            &self.params,
            &mut self.rng,
            &mut self.spawn_queue,
            &mut self.next_tank_number,
            &self.enemy_spawns,
            self.time.tick,
            &mut self.events,
        );
    }

    /// Check for level completion or game over. Game over wins ties:
    /// a dead player on the tick the last enemy falls is still a loss.
    fn evaluate_terminal(&mut self) {
        let player_gone = self
            .world
            .query::<&Player>()
            .iter()
            .next()
            .map(|(_, player)| player.lives == 0)
            .unwrap_or(true);
        if player_gone {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            return;
        }

        let enemies_alive = self
            .world
            .query::<&panzer_core::components::Enemy>()
            .iter()
            .count();
        if enemies_alive == 0 && self.spawn_queue.remaining() == 0 {
            self.phase = GamePhase::LevelComplete;
            self.score.score += SCORE_LEVEL_CLEARED;
            self.events.push(GameEvent::LevelCleared {
                points: SCORE_LEVEL_CLEARED,
            });
        }
    }

    // --- Test support ---

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn player_entity(&self) -> hecs::Entity {
        self.world
            .query::<&Player>()
            .iter()
            .next()
            .map(|(entity, _)| entity)
            .expect("no player tank in world")
    }

    #[cfg(test)]
    pub(crate) fn spawn_enemy_at(
        &mut self,
        position: Point,
        behavior: panzer_core::enums::AiBehavior,
    ) -> hecs::Entity {
        let number = self.next_tank_number;
        self.next_tank_number += 1;
        self.spawn_queue.consume_one();
        world_setup::spawn_enemy(&mut self.world, position, number, behavior)
    }

    #[cfg(test)]
    pub(crate) fn spawn_projectile_at(
        &mut self,
        position: Point,
        facing: panzer_core::enums::Direction,
        owner: Option<u32>,
    ) -> hecs::Entity {
        world_setup::spawn_projectile(&mut self.world, position, facing, owner)
    }

    #[cfg(test)]
    pub(crate) fn spawn_bonus_at(
        &mut self,
        position: Point,
        kind: panzer_core::enums::BonusKind,
    ) -> hecs::Entity {
        world_setup::spawn_bonus(&mut self.world, position, kind, self.params.bonus_ttl_ticks)
    }

    #[cfg(test)]
    pub(crate) fn drain_spawn_queue(&mut self) {
        self.spawn_queue.drain();
    }

    #[cfg(test)]
    pub(crate) fn run_sweep_once(&mut self) {
        systems::sweep::run(
            &mut self.world,
            &mut self.grid,
            self.player_spawn,
            self.player_number,
            &mut self.score,
            &mut self.events,
            &mut self.despawn_buffer,
        );
    }
}
