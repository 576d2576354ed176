//! Grid terrain, cells, and sight search for the LifeSim grid ecosystem.
//!
//! This crate models the physical world: a fixed rectangular grid of cells,
//! each plain ground, water, or a regenerating food patch, plus the
//! breadth-first search blips use to sense what is around them.
//!
//! # Modules
//!
//! - [`cell`] -- [`Cell`] with terrain, food stock, and ordered occupant
//!   membership.
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- [`Grid`]: row-major cell storage, legal actions, moves.
//! - [`sight`] -- Multi-source BFS reporting nearest water, food, and blip.
//! - [`terrain`] -- [`TerrainLayout`]: the deterministic starting map.

pub mod cell;
pub mod error;
pub mod grid;
pub mod sight;
pub mod terrain;

// Re-export primary types at crate root.
pub use cell::{Cell, FoodStock, Terrain};
pub use error::WorldError;
pub use grid::Grid;
pub use sight::{Sight, Sighting, look};
pub use terrain::TerrainLayout;
