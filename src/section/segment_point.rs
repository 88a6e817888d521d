#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::geometry::Z;
use crate::ids::{CellId, SegmentId, SegmentPointId};

/// A single trace's assigned crossing point on a segment, as produced by
/// the external cell router: a point carries `(x, y, z, connectionName)`.
/// This is the wire-level shape the Section Builder consumes;
/// [`SegmentPoint`] is the richer, indexed record it builds from these.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedPoint {
    pub x: f64,
    pub y: f64,
    pub z: Z,
    #[cfg_attr(feature = "serialize", serde(rename = "connectionName"))]
    pub connection_name: String,
}

/// A resolved, identified crossing point, indexed by the Section Builder.
/// Immutable once built; the Unravel Solver only ever overlays
/// modifications on top of it, never mutates it in place.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPoint {
    id: SegmentPointId,
    segment_id: SegmentId,
    capacity_mesh_node_ids: [CellId; 2],
    x: f64,
    y: f64,
    z: Z,
    connection_name: String,
    directly_connected_segment_point_ids: Vec<SegmentPointId>,
}

impl SegmentPoint {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: SegmentPointId,
        segment_id: SegmentId,
        capacity_mesh_node_ids: [CellId; 2],
        x: f64,
        y: f64,
        z: Z,
        connection_name: String,
    ) -> Self {
        Self {
            id,
            segment_id,
            capacity_mesh_node_ids,
            x,
            y,
            z,
            connection_name,
            directly_connected_segment_point_ids: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> SegmentPointId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn segment_id(&self) -> SegmentId {
        self.segment_id
    }

    #[inline]
    #[must_use]
    pub fn capacity_mesh_node_ids(&self) -> [CellId; 2] {
        self.capacity_mesh_node_ids
    }

    #[inline]
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    #[must_use]
    pub fn z(&self) -> Z {
        self.z
    }

    #[inline]
    #[must_use]
    pub fn connection_name(&self) -> &str {
        &self.connection_name
    }

    #[inline]
    #[must_use]
    pub fn directly_connected_segment_point_ids(&self) -> &[SegmentPointId] {
        &self.directly_connected_segment_point_ids
    }

    pub(crate) fn set_directly_connected(&mut self, ids: Vec<SegmentPointId>) {
        self.directly_connected_segment_point_ids = ids;
    }

    #[inline]
    #[must_use]
    pub fn incident_to(&self, node: CellId) -> bool {
        self.capacity_mesh_node_ids[0] == node || self.capacity_mesh_node_ids[1] == node
    }
}
