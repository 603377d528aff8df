//! Enemy tank decision policies.
//!
//! Pure functions that compute a per-tick action for an enemy tank
//! from its behavior, the player's position, and difficulty-driven
//! chances. No ECS dependency — operates on plain data with an
//! injected RNG.

pub mod policy;

pub use policy::{decide, AiContext, AiDecision};

#[cfg(test)]
mod tests;
