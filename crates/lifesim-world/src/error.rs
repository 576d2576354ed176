//! Error types for the `lifesim-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use lifesim_types::{BlipId, Position};

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A position lies outside the grid.
    #[error("position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid height.
        rows: usize,
        /// Grid width.
        cols: usize,
    },

    /// The blip is not a member of the cell it was removed from.
    #[error("blip {blip} is not in cell {position}")]
    BlipNotInCell {
        /// The blip.
        blip: BlipId,
        /// The cell.
        position: Position,
    },

    /// The blip is already a member of the cell it was added to.
    #[error("blip {blip} is already in cell {position}")]
    BlipAlreadyInCell {
        /// The blip.
        blip: BlipId,
        /// The cell.
        position: Position,
    },

    /// The terrain layout does not fit the grid.
    #[error("invalid terrain layout: {reason}")]
    InvalidLayout {
        /// Explanation of what is wrong with the layout.
        reason: String,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in grid calculation")]
    ArithmeticOverflow,
}
