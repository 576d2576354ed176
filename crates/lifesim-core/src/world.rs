//! The world: grid, blips, registry, and the tick protocol.
//!
//! [`World`] owns every blip in an arena keyed by [`BlipId`] and keeps the
//! authoritative blip -> position registry. Cells only list the ids
//! standing on them; the world keeps both views in lockstep.
//!
//! # Tick protocol
//!
//! 1. Clear every blip's processed flag
//! 2. Visit cells in row-major order. For each cell, regrow food, snapshot
//!    its occupants, and let each unprocessed blip in the snapshot act:
//!    spawn its bud on the cell it stood on, then remove it if it died,
//!    otherwise move it and let it drink or eat where it lands
//! 3. Record the population; if it has settled, empty the world
//!
//! A blip that moves East or South lands on a cell not yet visited and is
//! skipped there by its processed flag. Newborns are created processed and
//! first act on the next tick.

use std::collections::BTreeMap;

use lifesim_agents::{Blip, DecisionContext, Turn};
use lifesim_types::{Action, BlipId, CellView, Position};
use lifesim_world::{Grid, WorldError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::population::PopulationMonitor;
use crate::tick::{Deaths, TickError, TickSummary};

/// The simulated ecosystem.
///
/// Generic over its random source so runs can be replayed from a seed.
#[derive(Debug)]
pub struct World<R = StdRng> {
    config: SimulationConfig,
    grid: Grid,
    blips: BTreeMap<BlipId, Blip>,
    registry: BTreeMap<BlipId, Position>,
    next_id: BlipId,
    tick: u64,
    monitor: PopulationMonitor,
    rng: R,
}

impl World<StdRng> {
    /// Build a world driven by a [`StdRng`] seeded with `seed`.
    ///
    /// # Errors
    ///
    /// See [`World::new`].
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self, WorldError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> World<R> {
    /// Build the terrain and place the initial population.
    ///
    /// Each initial blip lands on a cell drawn uniformly, with replacement,
    /// from the plain cells, so several may share a cell. The config is
    /// expected to have passed [`SimulationConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidLayout`] if the terrain does not fit
    /// or there is no plain cell to place a non-zero population on.
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, WorldError> {
        let grid = config.terrain_layout().build()?;
        let monitor = PopulationMonitor::new(config.max_life);
        let mut world = Self {
            config,
            grid,
            blips: BTreeMap::new(),
            registry: BTreeMap::new(),
            next_id: BlipId::new(0),
            tick: 0,
            monitor,
            rng,
        };
        world.populate()?;

        info!(
            rows = world.grid.rows(),
            cols = world.grid.cols(),
            population = world.blips.len(),
            "World created"
        );
        Ok(world)
    }

    fn populate(&mut self) -> Result<(), WorldError> {
        let count = self.config.init_pop;
        if count == 0 {
            return Ok(());
        }
        let free = self.grid.free_cells();
        if free.is_empty() {
            return Err(WorldError::InvalidLayout {
                reason: format!("no plain cell to place {count} blips on"),
            });
        }
        for _ in 0..count {
            let pick = self.rng.random_range(0..free.len());
            if let Some(&position) = free.get(pick) {
                self.spawn(position)?;
            }
        }
        Ok(())
    }

    /// Lifespan of a blip born at `position`.
    ///
    /// Blips born at the center live `MAX-LIFE - AGE-VAR` ticks; each step
    /// of Manhattan distance from the center adds a share of `AGE-VAR`,
    /// reaching `MAX-LIFE` at the farthest corner. Positions off the grid
    /// get 0.
    pub fn lifespan_at(&self, position: Position) -> u32 {
        if !self.grid.contains(position) {
            return 0;
        }
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let center = Position::new(rows / 2, cols / 2);
        let max_dist = u64::try_from((rows / 2).saturating_add(cols / 2)).unwrap_or(u64::MAX);
        let dist = u64::try_from(position.manhattan(center)).unwrap_or(u64::MAX);

        let base = self.config.max_life.saturating_sub(self.config.age_var);
        let extra = dist
            .saturating_mul(u64::from(self.config.age_var))
            .checked_div(max_dist)
            .unwrap_or(0);
        base.saturating_add(u32::try_from(extra).unwrap_or(u32::MAX))
    }

    /// Create a blip at `position` with full reservoirs and the lifespan
    /// for that position.
    ///
    /// The newborn is marked processed, so it first acts on the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for a position off the grid and
    /// [`WorldError::ArithmeticOverflow`] if blip ids are exhausted.
    pub fn spawn(&mut self, position: Position) -> Result<BlipId, WorldError> {
        let id = self.next_id;
        let next = id.next().ok_or(WorldError::ArithmeticOverflow)?;
        self.grid.place(id, position)?;
        self.next_id = next;

        let lifespan = self.lifespan_at(position);
        self.blips.insert(id, Blip::new(id, lifespan, &self.config.blip));
        self.registry.insert(id, position);
        debug!(blip = %id, %position, lifespan, "Blip spawned");
        Ok(id)
    }

    /// Run one tick.
    ///
    /// # Errors
    ///
    /// Returns a [`TickError`] if the grid and registry disagree, a blip
    /// update fails, or a counter overflows. The world should not be
    /// ticked again after an error.
    pub fn tick(&mut self) -> Result<TickSummary, TickError> {
        let tick = self.tick.checked_add(1).ok_or(TickError::TickOverflow)?;
        self.tick = tick;

        for blip in self.blips.values_mut() {
            blip.begin_tick();
        }

        let mut births = 0_u32;
        let mut deaths = Deaths::default();
        for position in self.grid.positions() {
            self.grid.regenerate(position)?;

            let snapshot: Vec<BlipId> = self
                .grid
                .cell(position)
                .map(|cell| cell.occupants().to_vec())
                .unwrap_or_default();

            for id in snapshot {
                let pending = self.blips.get(&id).is_some_and(|b| !b.is_processed());
                if !pending {
                    continue;
                }
                let turn = self.act(id)?;
                if turn.budded {
                    births = births.saturating_add(1);
                }
                if let Some(cause) = turn.death {
                    deaths.record(cause);
                }
            }
        }

        let population = u32::try_from(self.blips.len()).unwrap_or(u32::MAX);
        let equilibrium = self.monitor.record(population);
        if equilibrium {
            let removed = self.clear_population();
            warn!(
                tick,
                population,
                removed,
                "Population within 10% of its running mean, ending run"
            );
        }

        let summary = TickSummary {
            tick,
            births,
            deaths,
            population,
            equilibrium,
        };
        debug!(
            tick,
            births,
            old_age = deaths.old_age,
            exhaustion = deaths.exhaustion,
            population,
            "Tick completed"
        );
        Ok(summary)
    }

    /// Let one blip take its turn and apply the result.
    fn act(&mut self, id: BlipId) -> Result<Turn, TickError> {
        let from = *self
            .registry
            .get(&id)
            .ok_or(TickError::UnregisteredBlip(id))?;
        let legal = self.grid.legal_actions(from);

        let blip = self
            .blips
            .get_mut(&id)
            .ok_or(TickError::UnregisteredBlip(id))?;
        let mut ctx = DecisionContext::new(
            &self.grid,
            from,
            &legal,
            self.config.see_range,
            &mut self.rng,
        );
        let turn = blip
            .update(&self.config.blip, &mut ctx)
            .map_err(|source| TickError::Agent { blip: id, source })?;

        if turn.budded {
            let child = self.spawn(from)?;
            debug!(parent = %id, child = %child, position = %from, "Bud detached");
        }

        if turn.action == Action::Die {
            self.grid.remove(id, from)?;
            self.registry.remove(&id);
            self.blips.remove(&id);
            return Ok(turn);
        }

        let to = self.grid.destination(from, turn.action)?;
        if to != from {
            self.grid.move_blip(id, from, to)?;
            self.registry.insert(id, to);
        }
        self.replenish(id, to);
        Ok(turn)
    }

    /// Drink on water, eat on food, as much as the blip is missing.
    fn replenish(&mut self, id: BlipId, at: Position) {
        let (Some(cell), Some(blip)) = (self.grid.cell_mut(at), self.blips.get_mut(&id)) else {
            return;
        };
        if cell.is_water() {
            let need = blip.reservoir().water_need();
            if need > 0
                && let Some(got) = cell.consume(need)
            {
                blip.drink(got);
            }
        } else if cell.is_food() {
            let need = blip.reservoir().food_need();
            if need > 0
                && let Some(got) = cell.consume(need)
            {
                blip.eat(got);
            }
        }
    }

    /// Remove every blip. Returns how many were removed.
    pub fn clear_population(&mut self) -> usize {
        let removed = self.grid.clear_occupants();
        self.registry.clear();
        self.blips.clear();
        removed
    }
}

impl<R> World<R> {
    /// Effective configuration.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// `(rows, cols)`.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.grid.rows(), self.grid.cols())
    }

    /// Render snapshot of one cell.
    pub fn cell_view(&self, position: Position) -> Option<CellView> {
        self.grid.view(position)
    }

    /// Number of live blips.
    pub fn population(&self) -> usize {
        self.blips.len()
    }

    /// Whether every blip is gone.
    pub fn is_extinct(&self) -> bool {
        self.blips.is_empty()
    }

    /// Ticks run so far.
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Look up a blip.
    pub fn blip(&self, id: BlipId) -> Option<&Blip> {
        self.blips.get(&id)
    }

    /// Where a blip stands.
    pub fn position_of(&self, id: BlipId) -> Option<Position> {
        self.registry.get(&id).copied()
    }

    /// Every live blip with its position, in id order.
    pub fn blips(&self) -> impl Iterator<Item = (&Blip, Position)> {
        self.blips
            .iter()
            .filter_map(|(id, blip)| self.registry.get(id).map(|&p| (blip, p)))
    }

    /// The population history.
    pub const fn monitor(&self) -> &PopulationMonitor {
        &self.monitor
    }

    /// Whether the registry, the arena, and cell membership agree: every
    /// blip stands in exactly one cell, and that cell is the one the
    /// registry names.
    pub fn is_consistent(&self) -> bool {
        if self.blips.len() != self.registry.len() {
            return false;
        }
        let registered_in_place = self.registry.iter().all(|(id, &position)| {
            self.blips.contains_key(id) && self.grid.cell(position).is_some_and(|c| c.contains(*id))
        });
        if !registered_in_place {
            return false;
        }
        let mut seen = 0_usize;
        for cell in self.grid.cells() {
            for id in cell.occupants() {
                if self.registry.get(id) != Some(&cell.position()) {
                    return false;
                }
                seen = seen.saturating_add(1);
            }
        }
        seen == self.registry.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lifesim_types::CellKind;
    use rand::rngs::SmallRng;

    use super::*;

    fn world(config: SimulationConfig, seed: u64) -> World<SmallRng> {
        World::new(config, SmallRng::seed_from_u64(seed)).unwrap()
    }

    fn plain(rows: usize, cols: usize) -> SimulationConfig {
        SimulationConfig {
            map_height: rows,
            map_width: cols,
            water_height: 0,
            water_width: 0,
            forest_width: 0,
            init_pop: 0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn lifespan_grows_toward_the_corners() {
        let w = world(SimulationConfig { init_pop: 0, ..SimulationConfig::default() }, 1);
        assert_eq!(w.lifespan_at(Position::new(10, 25)), 400);
        assert_eq!(w.lifespan_at(Position::new(0, 0)), 500);
        // dist 34 of 35 -> floor(3400 / 35) = 97
        assert_eq!(w.lifespan_at(Position::new(0, 49)), 497);
        assert_eq!(w.lifespan_at(Position::new(20, 0)), 0);
    }

    #[test]
    fn single_cell_grid_gets_base_lifespan() {
        let w = world(plain(1, 1), 1);
        assert_eq!(w.lifespan_at(Position::new(0, 0)), 400);
    }

    #[test]
    fn initial_population_on_plain_cells() {
        let w = world(SimulationConfig::default(), 9);
        assert_eq!(w.population(), 20);
        assert!(w.is_consistent());
        for (blip, position) in w.blips() {
            assert_eq!(w.cell_view(position).map(|v| v.kind), Some(CellKind::Empty));
            assert_eq!(blip.max_age(), w.lifespan_at(position));
            assert_eq!(blip.age(), 0);
        }
    }

    #[test]
    fn no_room_for_population_is_an_error() {
        let config = SimulationConfig {
            map_height: 2,
            map_width: 2,
            water_height: 2,
            water_width: 2,
            forest_width: 0,
            init_pop: 1,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            World::new(config, SmallRng::seed_from_u64(0)),
            Err(WorldError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn spawn_off_grid_fails() {
        let mut w = world(plain(3, 3), 1);
        assert!(matches!(
            w.spawn(Position::new(3, 3)),
            Err(WorldError::OutOfBounds { .. })
        ));
        assert!(w.is_extinct());
        // The failed spawn did not burn an id.
        assert_eq!(w.spawn(Position::new(0, 0)).unwrap(), BlipId::new(0));
    }

    #[test]
    fn ticks_keep_registry_and_cells_in_step() {
        let mut w = world(SimulationConfig::default(), 4);
        for expected in 1..=50 {
            let summary = w.tick().unwrap();
            assert_eq!(summary.tick, expected);
            assert!(w.is_consistent());
            assert_eq!(usize::try_from(summary.population).unwrap(), w.population());
        }
    }

    #[test]
    fn blip_landing_on_water_drinks() {
        // 1x2 grid: water at (0,0), plain at (0,1). A content young blip
        // wanders, and each cell offers exactly one move.
        let config = SimulationConfig {
            map_height: 1,
            map_width: 2,
            water_height: 1,
            water_width: 1,
            forest_width: 0,
            ..plain(1, 2)
        };
        let mut w = world(config, 2);
        let id = w.spawn(Position::new(0, 0)).unwrap();

        w.tick().unwrap();
        assert_eq!(w.position_of(id), Some(Position::new(0, 1)));
        assert_eq!(w.blip(id).map(|b| b.reservoir().water()), Some(298));

        w.tick().unwrap();
        assert_eq!(w.position_of(id), Some(Position::new(0, 0)));
        let blip = w.blip(id).unwrap();
        assert_eq!(blip.reservoir().water(), 300);
        assert_eq!(blip.reservoir().food(), 296);
    }

    #[test]
    fn blip_landing_on_food_eats_from_the_cell() {
        // 1x2 grid: plain at (0,0), forest at (0,1).
        let config = SimulationConfig {
            forest_width: 1,
            ..plain(1, 2)
        };
        let mut w = world(config, 2);
        let id = w.spawn(Position::new(0, 0)).unwrap();

        w.tick().unwrap();
        assert_eq!(w.position_of(id), Some(Position::new(0, 1)));
        let blip = w.blip(id).unwrap();
        assert_eq!(blip.reservoir().food(), 300);
        assert_eq!(blip.reservoir().water(), 298);
        // Eaten down to 98, then regrown when the cell's own turn came.
        assert_eq!(
            w.grid().cell(Position::new(0, 1)).and_then(|c| c.food_level()),
            Some(99)
        );
    }

    #[test]
    fn clearing_empties_everything() {
        let mut w = world(SimulationConfig::default(), 3);
        assert_eq!(w.clear_population(), 20);
        assert!(w.is_extinct());
        assert!(w.is_consistent());
        assert!(w.grid().cells().all(|c| !c.is_occupied()));
    }
}
