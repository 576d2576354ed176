//! Type-safe identifier wrappers around `u64`.
//!
//! Identifiers are handed out sequentially by the world that owns the
//! entities and are never reused, so a stale id can only ever miss, never
//! alias a newer entity.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw sequence number.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner sequence number.
            pub const fn into_inner(self) -> u64 {
                self.0
            }

            /// The identifier following this one, or `None` once the
            /// sequence is exhausted.
            pub const fn next(self) -> Option<Self> {
                match self.0.checked_add(1) {
                    Some(raw) => Some(Self(raw)),
                    None => None,
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a blip (mobile agent) in the simulation.
    BlipId
}
