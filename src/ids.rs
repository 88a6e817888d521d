//! Stable, strongly-typed identifiers. Each id space is generated from its
//! own monotonic counter.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use std::fmt;

macro_rules! id_type {
    ($name:ident, $prefix:literal) => {
        #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            #[inline]
            #[must_use]
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            #[inline]
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

id_type!(CellId, "C");
id_type!(SegmentId, "SEG");
id_type!(SegmentPointId, "SP");

/// A monotonically increasing counter used to mint ids within a single id
/// space. Each component (Mesh Builder, Section Builder) owns its own
/// counter so ids from different spaces never collide in meaning, even
/// though they are all backed by `u64`.
#[derive(Debug, Default, Clone)]
pub struct IdCounter(u64);

impl IdCounter {
    #[must_use]
    pub fn new() -> Self {
        Self(0)
    }

    /// Mint the next id of the given type.
    pub fn next<F: Fn(u64) -> T, T>(&mut self, ctor: F) -> T {
        let id = ctor(self.0);
        self.0 += 1;
        id
    }
}
