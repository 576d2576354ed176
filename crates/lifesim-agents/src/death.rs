//! Causes of blip death.
//!
//! A blip dies for exactly one of two reasons: it reached its assigned
//! lifespan, or neither its chosen action nor staying put is affordable.

use std::fmt;

/// Why a blip died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeathCause {
    /// Age reached the lifespan assigned at birth.
    OldAge,
    /// Reservoirs could not cover the cost of staying alive.
    Exhaustion,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OldAge => write!(f, "old age"),
            Self::Exhaustion => write!(f, "exhaustion"),
        }
    }
}
