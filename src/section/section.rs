use crate::ids::{CellId, SegmentId, SegmentPointId};
use crate::section::segment_point::SegmentPoint;

use std::collections::{HashMap, HashSet};

/// An unordered pair of directly-connected segment points sharing an
/// incident cell.
pub type SegmentPointPair = (SegmentPointId, SegmentPointId);

/// A mutable/immutable partition of the mesh around a root cell, together
/// with the segment-point graph and pair index the Unravel Solver searches
/// over. Built once by [`crate::section::SectionBuilder`] and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct UnravelSection {
    pub(crate) root_node_id: CellId,
    pub(crate) all_node_ids: HashSet<CellId>,
    pub(crate) mutable_node_ids: HashSet<CellId>,
    pub(crate) immutable_node_ids: HashSet<CellId>,
    pub(crate) mutable_segment_ids: HashSet<SegmentId>,
    pub(crate) segment_points: Vec<SegmentPoint>,
    pub(crate) segment_points_in_node: HashMap<CellId, Vec<SegmentPointId>>,
    pub(crate) segment_points_in_segment: HashMap<SegmentId, Vec<SegmentPointId>>,
    pub(crate) segment_pairs_in_node: HashMap<CellId, Vec<SegmentPointPair>>,
}

impl UnravelSection {
    #[inline]
    #[must_use]
    pub fn root_node_id(&self) -> CellId {
        self.root_node_id
    }

    #[inline]
    #[must_use]
    pub fn all_node_ids(&self) -> &HashSet<CellId> {
        &self.all_node_ids
    }

    #[inline]
    #[must_use]
    pub fn mutable_node_ids(&self) -> &HashSet<CellId> {
        &self.mutable_node_ids
    }

    #[inline]
    #[must_use]
    pub fn immutable_node_ids(&self) -> &HashSet<CellId> {
        &self.immutable_node_ids
    }

    #[inline]
    #[must_use]
    pub fn mutable_segment_ids(&self) -> &HashSet<SegmentId> {
        &self.mutable_segment_ids
    }

    #[inline]
    #[must_use]
    pub fn is_mutable_segment(&self, id: SegmentId) -> bool {
        self.mutable_segment_ids.contains(&id)
    }

    #[inline]
    #[must_use]
    pub fn segment_point(&self, id: SegmentPointId) -> &SegmentPoint {
        &self.segment_points[id.value() as usize]
    }

    #[inline]
    #[must_use]
    pub fn segment_points(&self) -> &[SegmentPoint] {
        &self.segment_points
    }

    #[inline]
    #[must_use]
    pub fn segment_points_in_node(&self, node: CellId) -> &[SegmentPointId] {
        self.segment_points_in_node
            .get(&node)
            .map_or(&[], Vec::as_slice)
    }

    #[inline]
    #[must_use]
    pub fn segment_points_in_segment(&self, segment: SegmentId) -> &[SegmentPointId] {
        self.segment_points_in_segment
            .get(&segment)
            .map_or(&[], Vec::as_slice)
    }

    #[inline]
    #[must_use]
    pub fn segment_pairs_in_node(&self, node: CellId) -> &[SegmentPointPair] {
        self.segment_pairs_in_node
            .get(&node)
            .map_or(&[], Vec::as_slice)
    }
}
