//! Procedural battlefield generation.
//!
//! Builds a fresh obstacle layout for each level: organic clusters
//! that grow with difficulty, a sheltering brick wall from level 2,
//! steel fortifications from level 3, and carved patrol lanes so no
//! field seals tanks in. Output is a validated [`MapDescriptor`], so
//! generated fields obey the same rules as hand-authored ones.

pub mod layout;

pub use layout::{generate, LayoutParams};
