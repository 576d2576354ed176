//! The rectangular grid of cells.
//!
//! The [`Grid`] is the spatial backbone of the simulation. Cells are stored
//! row-major in a flat vector, so iterating it visits `(0,0), (0,1), ...`
//! which is the order the tick protocol relies on.
//!
//! The grid tracks which blip stands where only through cell membership.
//! The authoritative blip -> position registry lives in the world that
//! owns the grid; the two are kept in lockstep by the world.

use lifesim_types::{Action, BlipId, CellView, Position};

use crate::cell::{Cell, Terrain};
use crate::error::WorldError;

/// A fixed-size rectangular grid of [`Cell`]s.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell gets the terrain chosen by `terrain_at`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidLayout`] for a zero-sized grid and
    /// [`WorldError::ArithmeticOverflow`] if `rows * cols` overflows.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut terrain_at: impl FnMut(Position) -> Terrain,
    ) -> Result<Self, WorldError> {
        if rows == 0 || cols == 0 {
            return Err(WorldError::InvalidLayout {
                reason: format!("grid must be at least 1x1, got {rows}x{cols}"),
            });
        }
        let len = rows.checked_mul(cols).ok_or(WorldError::ArithmeticOverflow)?;
        let mut cells = Vec::with_capacity(len);
        for row in 0..rows {
            for col in 0..cols {
                let position = Position::new(row, col);
                cells.push(Cell::new(position, terrain_at(position)));
            }
        }
        Ok(Self { rows, cols, cells })
    }

    /// Grid height.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Grid width.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells. Never true for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `position` lies inside the grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Row-major index of a position, if inside the grid.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        position
            .row
            .checked_mul(self.cols)
            .and_then(|base| base.checked_add(position.col))
    }

    /// Get an immutable reference to a cell.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index_of(position).and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to a cell.
    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index_of(position).and_then(|i| self.cells.get_mut(i))
    }

    /// Get a mutable reference to a cell, or an out-of-bounds error.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `position` is outside the grid.
    pub fn cell_mut_checked(&mut self, position: Position) -> Result<&mut Cell, WorldError> {
        let (rows, cols) = (self.rows, self.cols);
        self.cell_mut(position)
            .ok_or(WorldError::OutOfBounds { position, rows, cols })
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Positions of plain, unoccupied cells, in row-major order.
    pub fn free_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|c| c.is_empty() && !c.is_occupied())
            .map(Cell::position)
            .collect()
    }

    /// Actions a blip standing at `position` may legally take.
    ///
    /// `Die` and `Stay` are always legal. Moves are legal only when they
    /// stay on the grid. Moves are listed North, South, West, East.
    pub fn legal_actions(&self, position: Position) -> Vec<Action> {
        let mut actions = vec![Action::Die, Action::Stay];
        for action in [Action::North, Action::South, Action::West, Action::East] {
            if position.step(action, self.rows, self.cols).is_some() {
                actions.push(action);
            }
        }
        actions
    }

    /// Destination of `action` taken from `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the move leaves the grid.
    pub fn destination(&self, position: Position, action: Action) -> Result<Position, WorldError> {
        position
            .step(action, self.rows, self.cols)
            .ok_or(WorldError::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// Place a blip into a cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::BlipAlreadyInCell`].
    pub fn place(&mut self, blip: BlipId, at: Position) -> Result<(), WorldError> {
        self.cell_mut_checked(at)?.add_occupant(blip)
    }

    /// Remove a blip from a cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::BlipNotInCell`].
    pub fn remove(&mut self, blip: BlipId, at: Position) -> Result<(), WorldError> {
        self.cell_mut_checked(at)?.remove_occupant(blip)
    }

    /// Move a blip between two cells' memberships.
    ///
    /// Validates both ends before modifying anything.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`], [`WorldError::BlipNotInCell`],
    /// or [`WorldError::BlipAlreadyInCell`] as appropriate.
    pub fn move_blip(&mut self, blip: BlipId, from: Position, to: Position) -> Result<(), WorldError> {
        if from == to {
            return Ok(());
        }
        {
            let dest = self
                .cell(to)
                .ok_or(WorldError::OutOfBounds { position: to, rows: self.rows, cols: self.cols })?;
            if dest.contains(blip) {
                return Err(WorldError::BlipAlreadyInCell { blip, position: to });
            }
        }
        self.remove(blip, from)?;
        self.place(blip, to)
    }

    /// Regenerate the cell at `position`. Returns the units added.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `position` is outside the grid.
    pub fn regenerate(&mut self, position: Position) -> Result<u32, WorldError> {
        Ok(self.cell_mut_checked(position)?.regenerate())
    }

    /// Remove every blip from every cell. Returns how many were removed.
    pub fn clear_occupants(&mut self) -> usize {
        self.cells
            .iter_mut()
            .map(|c| c.clear_occupants().len())
            .fold(0_usize, usize::saturating_add)
    }

    /// Snapshot of one cell for rendering.
    pub fn view(&self, position: Position) -> Option<CellView> {
        self.cell(position).map(Cell::view)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lifesim_types::CellKind;

    use super::*;

    fn plain(rows: usize, cols: usize) -> Grid {
        Grid::from_fn(rows, cols, |_| Terrain::Empty).unwrap()
    }

    #[test]
    fn zero_sized_grid_rejected() {
        assert!(matches!(
            Grid::from_fn(0, 5, |_| Terrain::Empty),
            Err(WorldError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn cells_are_row_major() {
        let grid = plain(2, 3);
        let order: Vec<Position> = grid.cells().map(Cell::position).collect();
        let expected: Vec<Position> = grid.positions().collect();
        assert_eq!(order, expected);
        assert_eq!(order.get(3), Some(&Position::new(1, 0)));
    }

    #[test]
    fn corner_has_two_moves() {
        let grid = plain(5, 5);
        let actions = grid.legal_actions(Position::new(0, 0));
        assert_eq!(
            actions,
            vec![Action::Die, Action::Stay, Action::South, Action::East]
        );
    }

    #[test]
    fn interior_has_all_moves() {
        let grid = plain(5, 5);
        let actions = grid.legal_actions(Position::new(2, 2));
        assert_eq!(actions.len(), 6);
    }

    #[test]
    fn single_cell_grid_only_die_or_stay() {
        let grid = plain(1, 1);
        assert_eq!(
            grid.legal_actions(Position::new(0, 0)),
            vec![Action::Die, Action::Stay]
        );
    }

    #[test]
    fn move_updates_both_cells() {
        let mut grid = plain(3, 3);
        let blip = BlipId::new(1);
        assert!(grid.place(blip, Position::new(1, 1)).is_ok());
        assert!(grid.move_blip(blip, Position::new(1, 1), Position::new(1, 2)).is_ok());

        let from = grid.cell(Position::new(1, 1)).map(Cell::is_occupied);
        let to = grid.cell(Position::new(1, 2)).map(|c| c.contains(blip));
        assert_eq!(from, Some(false));
        assert_eq!(to, Some(true));
    }

    #[test]
    fn move_from_wrong_cell_fails() {
        let mut grid = plain(3, 3);
        let blip = BlipId::new(1);
        let result = grid.move_blip(blip, Position::new(0, 0), Position::new(0, 1));
        assert!(matches!(result, Err(WorldError::BlipNotInCell { .. })));
    }

    #[test]
    fn out_of_bounds_lookup_is_none() {
        let grid = plain(3, 3);
        assert!(grid.cell(Position::new(3, 0)).is_none());
        assert!(grid.cell(Position::new(0, 3)).is_none());
        assert!(matches!(
            grid.destination(Position::new(0, 0), Action::North),
            Err(WorldError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn free_cells_skip_terrain_and_occupied() {
        let mut grid = Grid::from_fn(2, 2, |p| {
            if p == Position::new(0, 0) { Terrain::Water } else { Terrain::Empty }
        })
        .unwrap();
        assert!(grid.place(BlipId::new(0), Position::new(1, 1)).is_ok());
        assert_eq!(
            grid.free_cells(),
            vec![Position::new(0, 1), Position::new(1, 0)]
        );
        assert_eq!(grid.view(Position::new(0, 0)).map(|v| v.kind), Some(CellKind::Water));
    }

    #[test]
    fn clear_occupants_counts_everyone() {
        let mut grid = plain(2, 2);
        assert!(grid.place(BlipId::new(0), Position::new(0, 0)).is_ok());
        assert!(grid.place(BlipId::new(1), Position::new(0, 0)).is_ok());
        assert!(grid.place(BlipId::new(2), Position::new(1, 1)).is_ok());
        assert_eq!(grid.clear_occupants(), 3);
        assert!(grid.cells().all(|c| !c.is_occupied()));
    }
}
