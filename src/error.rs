//! Typed errors for malformed input. Mesh exhaustion and unravel
//! stagnation are not represented here: both are non-fatal outcomes
//! reported through `tracing` or through the returned best candidate,
//! not as `Result` errors.

use thiserror::Error;

/// Failures rejected up front, before the Mesh Builder ever runs.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("obstacle references unknown layer `{0}`")]
    UnknownLayer(String),

    #[error("connection `{connection}` point ({x}, {y}) lies outside board bounds")]
    PointOutOfBounds {
        connection: String,
        x: f64,
        y: f64,
    },

    #[error("layerCount must be 2, got {0}")]
    UnsupportedLayerCount(u32),

    #[error("connection `{0}` has fewer than 2 points to connect")]
    TooFewConnectionPoints(String),

    #[error("board bounds are degenerate: minX={min_x} maxX={max_x} minY={min_y} maxY={max_y}")]
    DegenerateBounds {
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    },
}
