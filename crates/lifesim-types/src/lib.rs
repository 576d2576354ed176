//! Shared type definitions for the LifeSim grid ecosystem.
//!
//! Every crate in the workspace speaks in these types: blip identifiers,
//! grid positions, the action vocabulary, terrain kinds, and the read-only
//! views handed to whatever draws or reports on the simulation.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential integer identifiers for blips
//! - [`enums`] -- [`Action`] with its coordinate deltas, and [`CellKind`]
//! - [`structs`] -- [`Position`] and the [`CellView`] rendering snapshot

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, CellKind};
pub use ids::BlipId;
pub use structs::{CellView, Position};
