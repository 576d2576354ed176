//! Core value structs shared across the workspace.

use serde::{Deserialize, Serialize};

use crate::enums::{Action, CellKind};

/// A `(row, col)` coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index, growing southward.
    pub row: usize,
    /// Column index, growing eastward.
    pub col: usize,
}

impl Position {
    /// Create a position from a row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position reached by applying `action`, if it stays inside a
    /// `rows x cols` grid. `Stay` and `Die` return the same position.
    pub fn step(self, action: Action, rows: usize, cols: usize) -> Option<Self> {
        let (dr, dc) = action.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Self { row, col })
    }

    /// Manhattan distance to another position.
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row).saturating_add(self.col.abs_diff(other.col))
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Read-only snapshot of one cell, as consumed by a renderer or reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Terrain type.
    pub kind: CellKind,
    /// Current food level, present only for food cells.
    pub food: Option<u32>,
    /// Number of blips currently in the cell.
    pub occupants: u32,
}
