//! Map descriptor model and loader.
//!
//! Parses the text map format into a validated [`MapDescriptor`] and
//! carries the built-in fallback maps. Validation failures are fatal
//! configuration errors surfaced here, before any world is built — the
//! simulation engine only ever sees a valid descriptor.

pub mod builtin;
pub mod descriptor;

pub use builtin::{builtin_maps, BuiltinMap};
pub use descriptor::{MapDescriptor, MapError, TileCode};
