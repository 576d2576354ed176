//! Water and food reservoirs.
//!
//! Every blip carries two bounded reservoirs. Drinking and eating top them
//! up, clamped to capacity. Acting drains them. An action is affordable only
//! if each reservoir would stay strictly positive after paying for it.
//!
//! All arithmetic is saturating or widened. No panics, no silent overflow.

/// Water and food price of a single action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cost {
    /// Water spent.
    pub water: u32,
    /// Food spent.
    pub food: u32,
}

impl Cost {
    /// Nothing to pay.
    pub const FREE: Self = Self { water: 0, food: 0 };

    /// Multiply both sides by `factor`, saturating.
    pub const fn scaled(self, factor: u32) -> Self {
        Self {
            water: self.water.saturating_mul(factor),
            food: self.food.saturating_mul(factor),
        }
    }
}

/// A blip's water and food reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservoir {
    water: u32,
    food: u32,
    capacity: u32,
}

impl Reservoir {
    /// Both reservoirs filled to `capacity`.
    pub const fn full(capacity: u32) -> Self {
        Self {
            water: capacity,
            food: capacity,
            capacity,
        }
    }

    /// Current water.
    pub const fn water(&self) -> u32 {
        self.water
    }

    /// Current food.
    pub const fn food(&self) -> u32 {
        self.food
    }

    /// Upper bound shared by both reservoirs.
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Water missing until full.
    pub const fn water_need(&self) -> u32 {
        self.capacity.saturating_sub(self.water)
    }

    /// Food missing until full.
    pub const fn food_need(&self) -> u32 {
        self.capacity.saturating_sub(self.food)
    }

    /// Whether both reservoirs hold at least `threshold`.
    pub const fn holds_at_least(&self, threshold: u32) -> bool {
        self.water >= threshold && self.food >= threshold
    }

    /// Whether paying `cost` leaves both reservoirs strictly positive.
    pub const fn affords(&self, cost: Cost) -> bool {
        self.water > cost.water && self.food > cost.food
    }

    /// Add water, clamped to capacity. Returns the amount absorbed.
    pub fn drink(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.water_need());
        self.water = self.water.saturating_add(absorbed);
        absorbed
    }

    /// Add food, clamped to capacity. Returns the amount absorbed.
    pub fn eat(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.food_need());
        self.food = self.food.saturating_add(absorbed);
        absorbed
    }

    /// Subtract `cost`, flooring at zero.
    pub const fn pay(&mut self, cost: Cost) {
        self.water = self.water.saturating_sub(cost.water);
        self.food = self.food.saturating_sub(cost.food);
    }
}
