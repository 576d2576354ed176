//! Enumeration types for the LifeSim grid ecosystem.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// An action a blip resolves to once per tick.
///
/// Rows grow southward and columns grow eastward, so `North` is a step to
/// the previous row and `West` a step to the previous column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// The blip dies and leaves the world.
    Die,
    /// The blip remains in its current cell.
    Stay,
    /// Move one row up.
    North,
    /// Move one row down.
    South,
    /// Move one column right.
    East,
    /// Move one column left.
    West,
}

impl Action {
    /// The four movement actions in sight-search seed order.
    ///
    /// Breadth-first sight expands neighbors in exactly this order, which
    /// is what breaks ties between equally distant targets.
    pub const MOVES: [Self; 4] = [Self::East, Self::South, Self::West, Self::North];

    /// Row and column offsets for this action. `Die` and `Stay` do not move.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Die | Self::Stay => (0, 0),
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    /// Whether this action changes the blip's cell.
    pub const fn is_move(self) -> bool {
        matches!(self, Self::North | Self::South | Self::East | Self::West)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Die => write!(f, "die"),
            Self::Stay => write!(f, "stay"),
            Self::North => write!(f, "north"),
            Self::South => write!(f, "south"),
            Self::East => write!(f, "east"),
            Self::West => write!(f, "west"),
        }
    }
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// The terrain type of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Open ground with nothing to consume.
    Empty,
    /// An inexhaustible water source.
    Water,
    /// A regenerating food patch.
    Food,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_moves_cancel() {
        let (nr, nc) = Action::North.delta();
        let (sr, sc) = Action::South.delta();
        assert_eq!((nr + sr, nc + sc), (0, 0));

        let (er, ec) = Action::East.delta();
        let (wr, wc) = Action::West.delta();
        assert_eq!((er + wr, ec + wc), (0, 0));
    }

    #[test]
    fn stationary_actions_have_zero_delta() {
        assert_eq!(Action::Die.delta(), (0, 0));
        assert_eq!(Action::Stay.delta(), (0, 0));
        assert!(!Action::Die.is_move());
        assert!(!Action::Stay.is_move());
    }

    #[test]
    fn seed_order_is_east_south_west_north() {
        assert_eq!(
            Action::MOVES,
            [Action::East, Action::South, Action::West, Action::North]
        );
        assert!(Action::MOVES.iter().all(|a| a.is_move()));
    }
}
