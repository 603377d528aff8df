//! Simulation engine for the tank-battle game.
//!
//! `GameEngine` owns the hecs world, the obstacle grid, and the
//! per-level difficulty parameters; one `advance()` call applies one
//! tick and returns a renderable snapshot. Completely headless: no
//! input, rendering, or persistence dependency, enabling deterministic
//! testing.

pub mod access;
pub mod difficulty;
pub mod engine;
pub mod grid;
pub mod systems;
pub mod world_setup;

pub use difficulty::DifficultyParams;
pub use engine::{GameEngine, ScoreState, SimConfig};

#[cfg(test)]
mod tests;
