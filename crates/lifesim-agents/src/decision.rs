//! The blip decision rules and the survivability filter.
//!
//! Deciding picks what a blip wants to do from its needs and what it can
//! see. Filtering then checks what it can actually afford and how long it
//! has left. Both are pure functions of the blip's state and the
//! [`DecisionContext`]; randomness only enters through the context's RNG
//! when a content blip wanders.
//!
//! Ratios are compared by cross-multiplication in `u64`, so "less than 10%
//! of capacity" is `need * 10 < capacity` and "more than 1.3 times" is
//! `a * 10 > b * 13`.

use lifesim_types::{Action, Position};
use lifesim_world::{Grid, Sight, look};
use rand::Rng;

use crate::config::BlipConfig;
use crate::death::DeathCause;
use crate::vitals::Reservoir;

/// Everything a blip may consult while deciding.
///
/// Sight is computed on first use and cached, so a blip whose decision
/// does not depend on its surroundings never runs the search.
pub struct DecisionContext<'a, R> {
    grid: &'a Grid,
    position: Position,
    legal: &'a [Action],
    sight_range: u32,
    sight: Option<Sight>,
    rng: &'a mut R,
}

impl<'a, R: Rng> DecisionContext<'a, R> {
    /// Build a context for a blip standing at `position`.
    pub const fn new(
        grid: &'a Grid,
        position: Position,
        legal: &'a [Action],
        sight_range: u32,
        rng: &'a mut R,
    ) -> Self {
        Self {
            grid,
            position,
            legal,
            sight_range,
            sight: None,
            rng,
        }
    }

    /// Where the blip stands.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Actions legal at the blip's position, `Die` included.
    pub const fn legal(&self) -> &[Action] {
        self.legal
    }

    /// What the blip sees, searching on first call.
    pub fn sight(&mut self) -> Sight {
        *self
            .sight
            .get_or_insert_with(|| look(self.grid, self.position, self.sight_range))
    }

    /// The shared random source.
    pub const fn rng(&mut self) -> &mut R {
        self.rng
    }

    fn is_legal(&self, action: Action) -> bool {
        self.legal.contains(&action)
    }

    /// `action` if legal here, otherwise `Stay`.
    fn heading(&self, action: Action) -> Action {
        if self.is_legal(action) { action } else { Action::Stay }
    }

    /// Uniform choice among the legal moves, or `Stay` if there are none.
    fn wander(&mut self) -> Action {
        let moves: Vec<Action> = self.legal.iter().copied().filter(|a| a.is_move()).collect();
        if moves.is_empty() {
            return Action::Stay;
        }
        let pick = self.rng.random_range(0..moves.len());
        moves.get(pick).copied().unwrap_or(Action::Stay)
    }
}

/// Choose the action a blip wants to take, before affordability.
///
/// `age` is the blip's age after this tick's increment. The result is
/// never `Die`.
pub fn decide<R: Rng>(
    age: u32,
    reservoir: &Reservoir,
    config: &BlipConfig,
    ctx: &mut DecisionContext<'_, R>,
) -> Action {
    if age > config.max_budding_age {
        return Action::Stay;
    }

    let water_need = u64::from(reservoir.water_need());
    let food_need = u64::from(reservoir.food_need());
    let capacity = u64::from(config.max_res);

    if water_need.saturating_mul(10) < capacity && food_need.saturating_mul(10) < capacity {
        if let Some(toward) = ctx.sight().blip_direction() {
            return toward;
        }
        let stay = config.stay_cost();
        let moving = config.move_cost();
        let move_total = u64::from(moving.water).saturating_add(u64::from(moving.food));
        let stay_total = u64::from(stay.water).saturating_add(u64::from(stay.food));
        if move_total > stay_total && age >= config.min_budding_age {
            return Action::Stay;
        }
        return ctx.wander();
    }

    if exceeds_by_thirty_percent(water_need, food_need) {
        return ctx
            .sight()
            .water_direction()
            .unwrap_or_else(|| ctx.heading(Action::West));
    }

    if exceeds_by_thirty_percent(food_need, water_need) {
        return ctx
            .sight()
            .food_direction()
            .unwrap_or_else(|| ctx.heading(Action::East));
    }

    let sight = ctx.sight();
    if let Some(toward) = sight.food_direction().or_else(|| sight.water_direction()) {
        return toward;
    }

    // food_need / water_need > power_to_move / vapour_to_move
    let food_per_move = food_need.saturating_mul(u64::from(config.vapour_to_move));
    let water_per_move = water_need.saturating_mul(u64::from(config.power_to_move));
    if food_per_move > water_per_move {
        ctx.heading(Action::East)
    } else {
        ctx.heading(Action::West)
    }
}

/// `a > 1.3 * b`.
const fn exceeds_by_thirty_percent(a: u64, b: u64) -> bool {
    a.saturating_mul(10) > b.saturating_mul(13)
}

/// A filtered action and, if it is `Die`, why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The action the blip will take.
    pub action: Action,
    /// Set exactly when `action` is `Die`.
    pub death: Option<DeathCause>,
}

impl Resolution {
    const fn live(action: Action) -> Self {
        Self { action, death: None }
    }

    const fn die(cause: DeathCause) -> Self {
        Self {
            action: Action::Die,
            death: Some(cause),
        }
    }
}

/// Apply mortality and affordability to a wanted action.
///
/// Reaching the assigned lifespan forces `Die`. An unaffordable action
/// falls back to `Stay`, and an unaffordable `Stay` means `Die`. A wanted
/// `Die` passes through and is attributed to exhaustion.
pub const fn filter(
    wanted: Action,
    age: u32,
    max_age: u32,
    reservoir: &Reservoir,
    config: &BlipConfig,
    budding: bool,
) -> Resolution {
    if age >= max_age {
        return Resolution::die(DeathCause::OldAge);
    }
    if matches!(wanted, Action::Die) {
        return Resolution::die(DeathCause::Exhaustion);
    }
    if reservoir.affords(config.cost_of(wanted, budding)) {
        return Resolution::live(wanted);
    }
    if matches!(wanted, Action::Stay) {
        return Resolution::die(DeathCause::Exhaustion);
    }
    if reservoir.affords(config.cost_of(Action::Stay, budding)) {
        Resolution::live(Action::Stay)
    } else {
        Resolution::die(DeathCause::Exhaustion)
    }
}
