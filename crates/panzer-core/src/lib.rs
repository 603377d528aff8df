//! Core types and definitions for the tank-battle simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, commands, state snapshots, events, and
//! constants. It has no dependency on the ECS runtime or any I/O crate.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
