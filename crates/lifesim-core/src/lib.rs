//! Orchestration for the LifeSim grid ecosystem.
//!
//! This crate ties the grid and the blips together: it loads the
//! configuration, owns the [`World`] with its blip registry, runs the tick
//! protocol, watches the population for equilibrium, and drives whole
//! runs.
//!
//! # Modules
//!
//! - [`config`] -- [`SimulationConfig`] loading (JSON or YAML) and validation
//! - [`population`] -- [`PopulationMonitor`]: rolling history and the
//!   equilibrium rule
//! - [`runner`] -- [`run_simulation`](runner::run_simulation): the
//!   paced loop with its end conditions
//! - [`tick`] -- [`TickSummary`] and [`TickError`]
//! - [`world`] -- [`World`]: registry, spawning, lifespans, the tick itself

pub mod config;
pub mod population;
pub mod runner;
pub mod tick;
pub mod world;

pub use config::{ConfigError, SimulationConfig};
pub use population::PopulationMonitor;
pub use runner::{
    RunOptions, RunnerError, SimulationEndReason, SimulationResult, StopHandle, TickCallback,
};
pub use tick::{Deaths, TickError, TickSummary};
pub use world::World;
