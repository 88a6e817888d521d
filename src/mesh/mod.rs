//! Capacity mesh construction: adaptive quad-tree subdivision of the board
//! into routing cells, with layer subdivision under partial obstacles.

mod builder;
mod cell;
mod segment;

pub use builder::{Mesh, MeshBuilder, StepResult};
pub use cell::{AvailableZ, Cell};
pub use segment::Segment;
