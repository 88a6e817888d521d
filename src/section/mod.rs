//! Deriving the mutable/immutable partition, segment-point graph, and pair
//! index the Unravel Solver searches over.

mod builder;
#[allow(clippy::module_inception)]
mod section;
mod segment_point;

pub use builder::SectionBuilder;
pub use section::{SegmentPointPair, UnravelSection};
pub use segment_point::{AssignedPoint, SegmentPoint};
