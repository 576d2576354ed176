//! Grid cells: terrain, food stock, and occupant membership.
//!
//! A [`Cell`] never owns the blips standing on it. It only lists their
//! identifiers, in arrival order, so the world can visit them
//! deterministically. The blips themselves live in the world's arena.
//!
//! Food regenerates by a fixed amount per tick and is capped at its
//! capacity. Water is an unbounded source: drinking from it never
//! depletes it.

use lifesim_types::{BlipId, CellKind, CellView, Position};

use crate::error::WorldError;

/// A depletable, regenerating food supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FoodStock {
    /// Units currently available.
    pub available: u32,
    /// Units regenerated each tick.
    pub regen_per_tick: u32,
    /// Ceiling for `available`.
    pub max_capacity: u32,
}

impl FoodStock {
    /// A full stock with the given capacity and regeneration rate.
    pub const fn full(max_capacity: u32, regen_per_tick: u32) -> Self {
        Self {
            available: max_capacity,
            regen_per_tick,
            max_capacity,
        }
    }

    /// Apply one tick of regeneration. Returns the units actually added,
    /// which is zero when the stock is already full.
    pub fn regenerate(&mut self) -> u32 {
        let headroom = self.max_capacity.saturating_sub(self.available);
        let added = self.regen_per_tick.min(headroom);
        self.available = self.available.saturating_add(added);
        added
    }

    /// Take up to `requested` units. Returns the units actually taken.
    pub fn harvest(&mut self, requested: u32) -> u32 {
        let taken = requested.min(self.available);
        self.available = self.available.saturating_sub(taken);
        taken
    }
}

/// What a cell is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Terrain {
    /// Nothing to consume.
    Empty,
    /// Unbounded water.
    Water,
    /// A regenerating food patch.
    Food(FoodStock),
}

/// One grid cell with its terrain and current occupants.
#[derive(Debug, Clone)]
pub struct Cell {
    position: Position,
    terrain: Terrain,
    occupants: Vec<BlipId>,
}

impl Cell {
    /// Create an unoccupied cell.
    pub const fn new(position: Position, terrain: Terrain) -> Self {
        Self {
            position,
            terrain,
            occupants: Vec::new(),
        }
    }

    /// The cell's grid coordinate.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// The cell's terrain, including any food stock.
    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// The terrain type without resource state.
    pub const fn kind(&self) -> CellKind {
        match self.terrain {
            Terrain::Empty => CellKind::Empty,
            Terrain::Water => CellKind::Water,
            Terrain::Food(_) => CellKind::Food,
        }
    }

    /// Whether this is plain ground.
    pub const fn is_empty(&self) -> bool {
        matches!(self.terrain, Terrain::Empty)
    }

    /// Whether this is a water cell.
    pub const fn is_water(&self) -> bool {
        matches!(self.terrain, Terrain::Water)
    }

    /// Whether this is a food cell.
    pub const fn is_food(&self) -> bool {
        matches!(self.terrain, Terrain::Food(_))
    }

    /// Current food level, for food cells only.
    pub const fn food_level(&self) -> Option<u32> {
        match self.terrain {
            Terrain::Food(stock) => Some(stock.available),
            Terrain::Empty | Terrain::Water => None,
        }
    }

    /// Regenerate the cell's resources for one tick. Returns the units added.
    pub fn regenerate(&mut self) -> u32 {
        match &mut self.terrain {
            Terrain::Food(stock) => stock.regenerate(),
            Terrain::Empty | Terrain::Water => 0,
        }
    }

    /// Try to consume `requested` units from this cell.
    ///
    /// Water yields exactly `requested`. Food yields what it has, up to
    /// `requested`, and is debited. Empty ground has nothing to give and
    /// returns `None`.
    pub fn consume(&mut self, requested: u32) -> Option<u32> {
        match &mut self.terrain {
            Terrain::Water => Some(requested),
            Terrain::Food(stock) => Some(stock.harvest(requested)),
            Terrain::Empty => None,
        }
    }

    /// Blips currently in this cell, in arrival order.
    pub fn occupants(&self) -> &[BlipId] {
        &self.occupants
    }

    /// Number of blips currently in this cell.
    pub fn occupant_count(&self) -> u32 {
        u32::try_from(self.occupants.len()).unwrap_or(u32::MAX)
    }

    /// Whether at least one blip is here.
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Check whether a specific blip is in this cell.
    pub fn contains(&self, blip: BlipId) -> bool {
        self.occupants.contains(&blip)
    }

    /// Append a blip to this cell's occupants.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::BlipAlreadyInCell`] if the blip is already here.
    pub fn add_occupant(&mut self, blip: BlipId) -> Result<(), WorldError> {
        if self.contains(blip) {
            return Err(WorldError::BlipAlreadyInCell {
                blip,
                position: self.position,
            });
        }
        self.occupants.push(blip);
        Ok(())
    }

    /// Remove a blip from this cell's occupants, keeping the others in order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::BlipNotInCell`] if the blip is not here.
    pub fn remove_occupant(&mut self, blip: BlipId) -> Result<(), WorldError> {
        let index = self
            .occupants
            .iter()
            .position(|id| *id == blip)
            .ok_or(WorldError::BlipNotInCell {
                blip,
                position: self.position,
            })?;
        self.occupants.remove(index);
        Ok(())
    }

    /// Drop every occupant. Returns the removed identifiers.
    pub fn clear_occupants(&mut self) -> Vec<BlipId> {
        core::mem::take(&mut self.occupants)
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> CellView {
        CellView {
            kind: self.kind(),
            food: self.food_level(),
            occupants: self.occupant_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food_cell(available: u32, regen: u32, max: u32) -> Cell {
        Cell::new(
            Position::new(0, 0),
            Terrain::Food(FoodStock {
                available,
                regen_per_tick: regen,
                max_capacity: max,
            }),
        )
    }

    #[test]
    fn food_regenerates_by_rate() {
        let mut cell = food_cell(40, 10, 100);
        assert_eq!(cell.regenerate(), 10);
        assert_eq!(cell.food_level(), Some(50));
    }

    #[test]
    fn food_regeneration_capped_at_max() {
        let mut cell = food_cell(95, 10, 100);
        assert_eq!(cell.regenerate(), 5);
        assert_eq!(cell.food_level(), Some(100));
        assert_eq!(cell.regenerate(), 0);
        assert_eq!(cell.food_level(), Some(100));
    }

    #[test]
    fn water_and_empty_do_not_regenerate() {
        let mut water = Cell::new(Position::new(0, 0), Terrain::Water);
        let mut empty = Cell::new(Position::new(0, 1), Terrain::Empty);
        assert_eq!(water.regenerate(), 0);
        assert_eq!(empty.regenerate(), 0);
        assert_eq!(water.food_level(), None);
    }

    #[test]
    fn water_is_unbounded() {
        let mut cell = Cell::new(Position::new(0, 0), Terrain::Water);
        assert_eq!(cell.consume(250), Some(250));
        assert_eq!(cell.consume(1_000_000), Some(1_000_000));
    }

    #[test]
    fn food_consumption_partial_when_scarce() {
        let mut cell = food_cell(3, 1, 100);
        assert_eq!(cell.consume(10), Some(3));
        assert_eq!(cell.food_level(), Some(0));
        assert_eq!(cell.consume(10), Some(0));
    }

    #[test]
    fn food_consumption_debits_stock() {
        let mut cell = food_cell(100, 1, 100);
        assert_eq!(cell.consume(30), Some(30));
        assert_eq!(cell.food_level(), Some(70));
    }

    #[test]
    fn empty_cell_has_nothing_to_give() {
        let mut cell = Cell::new(Position::new(1, 1), Terrain::Empty);
        assert_eq!(cell.consume(5), None);
    }

    #[test]
    fn occupants_keep_arrival_order() {
        let mut cell = Cell::new(Position::new(1, 1), Terrain::Empty);
        for raw in [3, 1, 2] {
            assert!(cell.add_occupant(BlipId::new(raw)).is_ok());
        }
        assert!(cell.remove_occupant(BlipId::new(1)).is_ok());
        assert_eq!(cell.occupants(), &[BlipId::new(3), BlipId::new(2)]);
        assert_eq!(cell.occupant_count(), 2);
    }

    #[test]
    fn removing_absent_occupant_is_an_error() {
        let mut cell = Cell::new(Position::new(1, 1), Terrain::Empty);
        let result = cell.remove_occupant(BlipId::new(9));
        assert!(matches!(result, Err(WorldError::BlipNotInCell { .. })));
    }

    #[test]
    fn adding_twice_is_an_error() {
        let mut cell = Cell::new(Position::new(1, 1), Terrain::Empty);
        assert!(cell.add_occupant(BlipId::new(1)).is_ok());
        let result = cell.add_occupant(BlipId::new(1));
        assert!(matches!(result, Err(WorldError::BlipAlreadyInCell { .. })));
    }

    #[test]
    fn view_reports_kind_food_and_count() {
        let mut cell = food_cell(42, 1, 100);
        assert!(cell.add_occupant(BlipId::new(0)).is_ok());
        let view = cell.view();
        assert_eq!(view.kind, CellKind::Food);
        assert_eq!(view.food, Some(42));
        assert_eq!(view.occupants, 1);
    }
}
