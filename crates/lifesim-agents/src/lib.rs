//! Blip state and behavior for the LifeSim grid ecosystem.
//!
//! A blip is a tiny organism with water and food reservoirs, an age, and a
//! lifespan fixed at birth. Each tick it may bud, ages by one, decides on
//! an action from what it needs and what it can see, and pays for that
//! action. This crate holds everything about a single blip; placing blips
//! on the grid and applying their turns is the world's job.
//!
//! # Modules
//!
//! - [`blip`] -- [`Blip`] and the per-tick [`Turn`] it reports
//! - [`config`] -- [`BlipConfig`]: metabolism and budding parameters
//! - [`death`] -- [`DeathCause`]
//! - [`decision`] -- Decision rules, the survivability filter, and
//!   [`DecisionContext`]
//! - [`error`] -- Error types for blip updates
//! - [`reproduction`] -- Budding eligibility and countdown
//! - [`vitals`] -- [`Reservoir`] and action [`Cost`]s

pub mod blip;
pub mod config;
pub mod death;
pub mod decision;
pub mod error;
pub mod reproduction;
pub mod vitals;

pub use blip::{Blip, Turn};
pub use config::BlipConfig;
pub use death::DeathCause;
pub use decision::{DecisionContext, Resolution, decide, filter};
pub use error::AgentError;
pub use reproduction::Budding;
pub use vitals::{Cost, Reservoir};
