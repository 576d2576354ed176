//! Error types for the lifesim-agents crate.
//!
//! Blip updates never panic. The only failures are protocol misuse by the
//! caller and counters that would overflow.

use lifesim_types::BlipId;

/// Errors that can occur while updating a blip.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The blip was asked to act twice in the same tick.
    #[error("blip {0} already acted this tick")]
    AlreadyProcessed(BlipId),

    /// An arithmetic overflow occurred while updating a counter.
    #[error("arithmetic overflow in blip update: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
