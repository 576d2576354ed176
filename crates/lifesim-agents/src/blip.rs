//! The blip: a grid organism with an age, a lifespan, two reservoirs, and
//! an optional bud in progress.
//!
//! A blip does not know where it is. Each tick the world hands it a
//! [`DecisionContext`] describing its surroundings, and [`Blip::update`]
//! returns a [`Turn`] saying what it did. The world applies the move, the
//! death, or the newborn.

use lifesim_types::{Action, BlipId};
use rand::Rng;
use tracing::debug;

use crate::config::BlipConfig;
use crate::death::DeathCause;
use crate::decision::{self, DecisionContext};
use crate::error::AgentError;
use crate::reproduction::{self, Budding};
use crate::vitals::Reservoir;

/// Outcome of one blip update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// The resolved action.
    pub action: Action,
    /// Whether a bud detached this tick. The newborn belongs on the cell
    /// the blip stood on before moving.
    pub budded: bool,
    /// Set exactly when `action` is `Die`.
    pub death: Option<DeathCause>,
}

/// A single organism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blip {
    id: BlipId,
    age: u32,
    max_age: u32,
    reservoir: Reservoir,
    budding: Budding,
    processed: bool,
}

impl Blip {
    /// A newborn with full reservoirs.
    ///
    /// Newborns count as already processed, so a blip created mid-tick does
    /// not act until the next tick.
    pub const fn new(id: BlipId, max_age: u32, config: &BlipConfig) -> Self {
        Self {
            id,
            age: 0,
            max_age,
            reservoir: Reservoir::full(config.max_res),
            budding: Budding::IDLE,
            processed: true,
        }
    }

    /// Identifier.
    pub const fn id(&self) -> BlipId {
        self.id
    }

    /// Ticks lived.
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Lifespan assigned at birth.
    pub const fn max_age(&self) -> u32 {
        self.max_age
    }

    /// Current reserves.
    pub const fn reservoir(&self) -> &Reservoir {
        &self.reservoir
    }

    /// Current budding countdown.
    pub const fn budding(&self) -> Budding {
        self.budding
    }

    /// Whether this blip already acted in the current tick.
    pub const fn is_processed(&self) -> bool {
        self.processed
    }

    /// Clear the processed flag at the start of a tick.
    pub const fn begin_tick(&mut self) {
        self.processed = false;
    }

    /// Top up water from a water cell. Returns the amount absorbed.
    pub fn drink(&mut self, amount: u32) -> u32 {
        self.reservoir.drink(amount)
    }

    /// Top up food from a food cell. Returns the amount absorbed.
    pub fn eat(&mut self, amount: u32) -> u32 {
        self.reservoir.eat(amount)
    }

    /// Run one tick of the blip's life.
    ///
    /// # Order of operations
    ///
    /// 1. Advance any bud in progress; report a bud if it completes
    /// 2. Try to start a new bud
    /// 3. Increment age
    /// 4. Decide among the legal actions other than `Die`
    /// 5. Filter for lifespan and affordability
    /// 6. Pay for the resolved action
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AlreadyProcessed`] if called twice in one tick
    /// and [`AgentError::ArithmeticOverflow`] if the age counter overflows.
    pub fn update<R: Rng>(
        &mut self,
        config: &BlipConfig,
        ctx: &mut DecisionContext<'_, R>,
    ) -> Result<Turn, AgentError> {
        if self.processed {
            return Err(AgentError::AlreadyProcessed(self.id));
        }
        self.processed = true;

        let budded = self.budding.advance();
        if reproduction::try_start(&mut self.budding, self.age, &self.reservoir, config, ctx.rng()) {
            debug!(blip = %self.id, age = self.age, ticks = config.budding_time, "Budding started");
        }

        self.age = self.age.checked_add(1).ok_or_else(|| AgentError::ArithmeticOverflow {
            context: String::from("age increment overflow"),
        })?;

        let wanted = decision::decide(self.age, &self.reservoir, config, ctx);
        let resolved = decision::filter(
            wanted,
            self.age,
            self.max_age,
            &self.reservoir,
            config,
            self.budding.is_active(),
        );

        self.reservoir
            .pay(config.cost_of(resolved.action, self.budding.is_active()));

        if let Some(cause) = resolved.death {
            debug!(blip = %self.id, age = self.age, %cause, "Blip died");
        }

        Ok(Turn {
            action: resolved.action,
            budded,
            death: resolved.death,
        })
    }
}
