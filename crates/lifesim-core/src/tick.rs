//! Tick results and tick errors.
//!
//! A tick is one full pass of [`World::tick`](crate::world::World::tick):
//! regrow food, let every blip act once, record the population. This
//! module holds what a tick reports and how it fails.

use std::fmt;

use lifesim_agents::{AgentError, DeathCause};
use lifesim_types::BlipId;
use lifesim_world::WorldError;
use serde::Serialize;

/// Errors that can occur during tick execution.
///
/// Every variant is a broken invariant or an exhausted counter, so the
/// run cannot continue past one.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A blip update failed.
    #[error("blip {blip}: {source}")]
    Agent {
        /// The blip that failed.
        blip: BlipId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// A blip found in a cell has no registry entry.
    #[error("blip {0} is on the grid but not in the registry")]
    UnregisteredBlip(BlipId),

    /// The tick counter overflowed.
    #[error("tick counter overflow")]
    TickOverflow,
}

/// Deaths during one tick, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Deaths {
    /// Blips that reached their lifespan.
    pub old_age: u32,
    /// Blips that could not pay for staying alive.
    pub exhaustion: u32,
}

impl Deaths {
    /// Count one death.
    pub const fn record(&mut self, cause: DeathCause) {
        match cause {
            DeathCause::OldAge => self.old_age = self.old_age.saturating_add(1),
            DeathCause::Exhaustion => self.exhaustion = self.exhaustion.saturating_add(1),
        }
    }

    /// All deaths.
    pub const fn total(&self) -> u32 {
        self.old_age.saturating_add(self.exhaustion)
    }
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed, starting at 1.
    pub tick: u64,
    /// Blips born this tick.
    pub births: u32,
    /// Blips that died this tick.
    pub deaths: Deaths,
    /// Population recorded at the end of the tick. If `equilibrium` is
    /// set, the world was emptied right after this count.
    pub population: u32,
    /// Whether the population monitor ended the run this tick.
    pub equilibrium: bool,
}

impl fmt::Display for TickSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {}: population {} (+{} / -{})",
            self.tick,
            self.population,
            self.births,
            self.deaths.total()
        )?;
        if self.equilibrium {
            write!(f, ", equilibrium")?;
        }
        Ok(())
    }
}
