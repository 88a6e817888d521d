#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::ids::{CellId, SegmentPointId};

/// A local configuration inside a cell that increases its routing cost.
/// Attached to the specific cell it was detected in.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnravelIssue {
    /// Two directly-connected points of the same net enter/exit the cell
    /// on different layers, forcing a via.
    TransitionVia {
        points: [SegmentPointId; 2],
        node_id: CellId,
    },

    /// Two distinct net-pair line segments cross on the same layer inside
    /// the cell.
    SameLayerCrossing {
        crossing_line_1: [SegmentPointId; 2],
        crossing_line_2: [SegmentPointId; 2],
        node_id: CellId,
    },

    /// A transition_via cell where exactly one of the two points also
    /// participates in a same-layer crossing on the post-transition layer
    /// (see DESIGN.md for the detection rule).
    SingleTransitionCrossing { node_id: CellId },

    /// A transition_via cell where both points participate in same-layer
    /// crossings on their respective layers.
    DoubleTransitionCrossing { node_id: CellId },

    /// Reserved: emitted by an auxiliary capacity detector, not by
    /// `getIssuesInSection`. No operation responds to this variant.
    SameLayerTraceImbalanceWithLowCapacity { node_id: CellId },
}

impl UnravelIssue {
    #[inline]
    #[must_use]
    pub fn node_id(&self) -> CellId {
        match self {
            Self::TransitionVia { node_id, .. }
            | Self::SameLayerCrossing { node_id, .. }
            | Self::SingleTransitionCrossing { node_id }
            | Self::DoubleTransitionCrossing { node_id }
            | Self::SameLayerTraceImbalanceWithLowCapacity { node_id } => *node_id,
        }
    }
}
