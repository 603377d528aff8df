//! Simulation systems, run by the engine in a fixed order each tick.

pub mod bonuses;
pub mod enemy;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
pub mod sweep;
pub mod timers;
