//! Configuration parameters for blip metabolism and budding.
//!
//! These values correspond to the `BLIP` block of the simulation config.
//! "Vapour" is the water side of a cost and "power" the food side. The
//! [`BlipConfig`] struct bundles every tunable so that callers (the world,
//! tests) can override defaults.

use lifesim_types::Action;
use serde::Serialize;

use crate::vitals::Cost;

/// Configuration for blip mechanics applied each tick.
///
/// All amounts are whole units of water or food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub struct BlipConfig {
    /// Minimum water and food required to start budding (default: 100).
    pub budding_min_res: u32,

    /// Youngest age at which budding can start (default: 150).
    pub min_budding_age: u32,

    /// Oldest age at which budding can start (default: 350). Past this age
    /// a blip stops roaming and stays put.
    pub max_budding_age: u32,

    /// Chance, in percent, that an eligible blip starts budding on a given
    /// tick (default: 10).
    pub budding_prob: u32,

    /// Ticks between the start of budding and the new blip appearing
    /// (default: 1).
    pub budding_time: u32,

    /// Cost multiplier applied while budding (default: 2).
    pub bud_factor: u32,

    /// Food spent to stay in place (default: 1).
    pub power_to_stay: u32,

    /// Water spent to stay in place (default: 1).
    pub vapour_to_stay: u32,

    /// Food spent to move one cell (default: 2).
    pub power_to_move: u32,

    /// Water spent to move one cell (default: 2).
    pub vapour_to_move: u32,

    /// Capacity of each reservoir; new blips start full (default: 300).
    pub max_res: u32,
}

impl Default for BlipConfig {
    fn default() -> Self {
        Self {
            budding_min_res: 100,
            min_budding_age: 150,
            max_budding_age: 350,
            budding_prob: 10,
            budding_time: 1,
            bud_factor: 2,
            power_to_stay: 1,
            vapour_to_stay: 1,
            power_to_move: 2,
            vapour_to_move: 2,
            max_res: 300,
        }
    }
}

impl BlipConfig {
    /// Base cost of staying in place.
    pub const fn stay_cost(&self) -> Cost {
        Cost {
            water: self.vapour_to_stay,
            food: self.power_to_stay,
        }
    }

    /// Base cost of moving one cell.
    pub const fn move_cost(&self) -> Cost {
        Cost {
            water: self.vapour_to_move,
            food: self.power_to_move,
        }
    }

    /// What `action` costs, scaled by `bud_factor` while budding.
    ///
    /// Dying is free.
    pub const fn cost_of(&self, action: Action, budding: bool) -> Cost {
        let base = match action {
            Action::Die => return Cost::FREE,
            Action::Stay => self.stay_cost(),
            Action::North | Action::South | Action::East | Action::West => self.move_cost(),
        };
        if budding {
            base.scaled(self.bud_factor)
        } else {
            base
        }
    }
}
