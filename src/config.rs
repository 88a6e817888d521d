//! Tunable constants for the Mesh Builder and Unravel Solver, grouped
//! instead of scattered as literals.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::mesh::MeshBuilder`].
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    /// Maximum quad-tree subdivision depth. A cell at this depth is never
    /// further xy-subdivided.
    pub max_depth: u8,

    /// The board's minimum trace width, used by the caller to pick
    /// `max_depth` such that leaf cells can resolve a trace.
    pub min_trace_width: f64,
}

impl MeshConfig {
    #[must_use]
    pub fn new(max_depth: u8, min_trace_width: f64) -> Self {
        assert!(max_depth >= 1, "max_depth must be >= 1");
        Self {
            max_depth,
            min_trace_width,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            min_trace_width: 0.2,
        }
    }
}

/// Configuration for [`crate::unravel::Solver`].
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Radius, in segment-adjacency hops, within which a cell's segments
    /// may be modified by the solver. Defaults to 1.
    pub mutable_hops: u32,

    /// An explicit bound on candidate expansions, so a pathological
    /// section can never spin the solver forever.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mutable_hops: 1,
            max_iterations: 10_000,
        }
    }
}

/// Empirically fitted cost-function coefficients. Treated as a fixed,
/// documented constant tuple; do not turn these into user-facing
/// hyperparameters without regressing against a known same-layer-crossing
/// fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCoefficients {
    pub same_layer_crossing_weight: f64,
    pub transition_crossing_weight: f64,
    pub transition_via_weight: f64,
    pub via_capacity_exponent: f64,
}

impl Default for CostCoefficients {
    fn default() -> Self {
        Self {
            same_layer_crossing_weight: 0.82,
            transition_crossing_weight: 0.41,
            transition_via_weight: 0.2,
            via_capacity_exponent: 1.1,
        }
    }
}
