//! Strongly typed, zero-cost identifier wrappers.
//!
//! IDs are plain indices into the owning `City`'s edge/node arrays, unique
//! within one `City` instance and stable for its lifetime.  All IDs are
//! `Copy + Ord + Hash` so they can be used as map keys and sorted collection
//! elements without ceremony.  Callers should use `.index()` rather than
//! reaching for the inner integer directly.

use std::fmt;

/// Generate a typed ID wrapper around `u32` with a one-letter display prefix.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, prefix $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(u32::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a mobile agent in the simulation's agent list.
    pub struct AgentId, prefix "a";
}

typed_id! {
    /// Index of a city-graph node (an intersection).
    pub struct NodeId, prefix "n";
}

typed_id! {
    /// Index of a directed city-graph edge (a street segment).
    pub struct EdgeId, prefix "e";
}
