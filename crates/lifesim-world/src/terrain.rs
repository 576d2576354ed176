//! Deterministic starting terrain.
//!
//! The map is plain ground with two fixed blocks:
//!
//! ```text
//!  col 0          cols - forest_width      cols
//!  +-------+--------------------+-----------+
//!  | water |                    |           |  row 0
//!  +-------+                    |  forest   |
//!  |                            |  (food)   |
//!  |          empty             |           |
//!  +----------------------------+-----------+  rows
//! ```
//!
//! The water block sits in the north-west corner; the forest spans every
//! row along the eastern edge. Both are rectangles derived from the grid
//! size, so the layout is identical on every run.

use lifesim_types::Position;
use tracing::debug;

use crate::cell::{FoodStock, Terrain};
use crate::error::WorldError;
use crate::grid::Grid;

/// Geometry and food parameters for the starting map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainLayout {
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub cols: usize,
    /// Height of the north-west water block.
    pub water_height: usize,
    /// Width of the north-west water block.
    pub water_width: usize,
    /// Width of the forest strip on the eastern edge.
    pub forest_width: usize,
    /// Food capacity of each forest cell (cells start full).
    pub food_size: u32,
    /// Food regenerated per forest cell per tick.
    pub food_build: u32,
}

impl Default for TerrainLayout {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 50,
            water_height: 5,
            water_width: 5,
            forest_width: 5,
            food_size: 100,
            food_build: 1,
        }
    }
}

impl TerrainLayout {
    /// Check that both blocks fit the grid and do not overlap.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidLayout`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.water_height > self.rows || self.water_width > self.cols {
            return Err(invalid(format!(
                "water block {}x{} does not fit a {}x{} grid",
                self.water_height, self.water_width, self.rows, self.cols
            )));
        }
        if self.forest_width > self.cols {
            return Err(invalid(format!(
                "forest width {} exceeds grid width {}",
                self.forest_width, self.cols
            )));
        }
        let has_water = self.water_height > 0 && self.water_width > 0;
        let forest_start = self.forest_start();
        if has_water && self.forest_width > 0 && self.water_width > forest_start {
            return Err(invalid(format!(
                "water block (width {}) overlaps the forest starting at column {forest_start}",
                self.water_width
            )));
        }
        Ok(())
    }

    /// First column of the forest strip.
    pub const fn forest_start(&self) -> usize {
        self.cols.saturating_sub(self.forest_width)
    }

    /// Terrain for a single position under this layout.
    pub fn terrain_at(&self, position: Position) -> Terrain {
        if position.row < self.water_height && position.col < self.water_width {
            Terrain::Water
        } else if self.forest_width > 0 && position.col >= self.forest_start() {
            Terrain::Food(FoodStock::full(self.food_size, self.food_build))
        } else {
            Terrain::Empty
        }
    }

    /// Build the starting grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidLayout`] if [`validate`](Self::validate)
    /// fails.
    pub fn build(&self) -> Result<Grid, WorldError> {
        self.validate()?;
        let grid = Grid::from_fn(self.rows, self.cols, |p| self.terrain_at(p))?;
        debug!(
            rows = self.rows,
            cols = self.cols,
            water = %format_args!("{}x{}", self.water_height, self.water_width),
            forest_width = self.forest_width,
            "Terrain built"
        );
        Ok(grid)
    }
}

fn invalid(reason: String) -> WorldError {
    WorldError::InvalidLayout { reason }
}
