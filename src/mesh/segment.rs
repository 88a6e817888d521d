#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::geometry::LineSeg;
use crate::ids::{CellId, SegmentId};

/// A shared boundary between two adjacent cells, along which traces can
/// cross. This is the structural half of a segment; the assigned crossing
/// points are attached later by whatever produced them (the external
/// cell router), and are modeled by [`crate::section`].
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    id: SegmentId,
    cells: [CellId; 2],
    boundary: LineSeg,
}

impl Segment {
    #[must_use]
    pub(crate) fn new(id: SegmentId, cells: [CellId; 2], boundary: LineSeg) -> Self {
        Self {
            id,
            cells,
            boundary,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> SegmentId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn cells(&self) -> [CellId; 2] {
        self.cells
    }

    #[inline]
    #[must_use]
    pub fn boundary(&self) -> LineSeg {
        self.boundary
    }

    #[inline]
    #[must_use]
    pub fn other_cell(&self, from: CellId) -> Option<CellId> {
        if self.cells[0] == from {
            Some(self.cells[1])
        } else if self.cells[1] == from {
            Some(self.cells[0])
        } else {
            None
        }
    }
}
