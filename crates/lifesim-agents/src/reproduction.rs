//! Budding: asexual reproduction.
//!
//! A blip that is old enough, young enough, and well supplied may start
//! budding with a configured per-tick probability. Budding runs for
//! `budding_time` ticks, during which every action costs `bud_factor` times
//! as much. When the countdown reaches zero the blip's tick result reports
//! a bud and the world places a newborn on the parent's cell.
//!
//! At most one bud is in progress per blip. A countdown that completes on a
//! tick leaves the blip free to start again on that same tick.

use rand::Rng;

use crate::config::BlipConfig;
use crate::vitals::Reservoir;

/// Budding countdown. Zero means not budding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budding {
    remaining: u32,
}

impl Budding {
    /// Not budding.
    pub const IDLE: Self = Self { remaining: 0 };

    /// Whether a bud is in progress.
    pub const fn is_active(self) -> bool {
        self.remaining > 0
    }

    /// Ticks left until the bud detaches.
    pub const fn remaining(self) -> u32 {
        self.remaining
    }

    /// Begin a countdown of `duration` ticks.
    pub const fn start(&mut self, duration: u32) {
        self.remaining = duration;
    }

    /// Count down one tick. Returns `true` when this tick completes a bud.
    pub const fn advance(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// Whether a blip at `age` with `reservoir` may start budding.
///
/// Both age bounds are inclusive, and both reservoirs must hold at least
/// `budding_min_res`.
pub const fn is_eligible(age: u32, reservoir: &Reservoir, config: &BlipConfig) -> bool {
    age >= config.min_budding_age
        && age <= config.max_budding_age
        && reservoir.holds_at_least(config.budding_min_res)
}

/// Roll the per-tick budding chance.
///
/// `chance_pct` is a whole percentage; 0 never buds and 100 always does.
pub fn roll(chance_pct: u32, rng: &mut impl Rng) -> bool {
    rng.random_range(0..100_u32) < chance_pct
}

/// Try to start budding this tick.
///
/// Does nothing while a bud is already in progress or the blip is not
/// eligible. The random roll is only drawn for eligible blips. Returns
/// `true` if a countdown was started.
pub fn try_start(
    budding: &mut Budding,
    age: u32,
    reservoir: &Reservoir,
    config: &BlipConfig,
    rng: &mut impl Rng,
) -> bool {
    if budding.is_active() || !is_eligible(age, reservoir, config) {
        return false;
    }
    if !roll(config.budding_prob, rng) {
        return false;
    }
    budding.start(config.budding_time);
    budding.is_active()
}
