#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::geometry::Z;
use crate::ids::SegmentPointId;
use crate::section::UnravelSection;
use crate::unravel::issue::UnravelIssue;

use fxhash::FxHashMap;

/// A point's coordinates/layer overridden by a candidate, on top of its
/// baseline [`crate::section::SegmentPoint`] values.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointOverride {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<Z>,
}

/// `pointModifications`: a partial mapping overriding baseline
/// coordinates.
pub type PointModifications = FxHashMap<SegmentPointId, PointOverride>;

/// The resolved `(x, y, z)` of a segment point under a set of
/// modifications, falling back to its baseline value.
#[must_use]
pub fn resolve_point(
    section: &UnravelSection,
    modifications: &PointModifications,
    id: SegmentPointId,
) -> (f64, f64, Z) {
    let base = section.segment_point(id);
    let ov = modifications.get(&id).copied().unwrap_or_default();
    (
        ov.x.unwrap_or(base.x()),
        ov.y.unwrap_or(base.y()),
        ov.z.unwrap_or(base.z()),
    )
}

/// A local edit proposed in response to an issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ChangeLayer { new_z: Z, ids: Vec<SegmentPointId> },
    SwapPositionOnSegment { ids: [SegmentPointId; 2] },
}

impl Operation {
    /// `applyOperationToPointModifications`: produces a new modifications
    /// map on top of the current one.
    #[must_use]
    pub fn apply(
        &self,
        section: &UnravelSection,
        modifications: &PointModifications,
    ) -> PointModifications {
        let mut next = modifications.clone();
        match self {
            Operation::ChangeLayer { new_z, ids } => {
                for &id in ids {
                    let entry = next.entry(id).or_default();
                    entry.z = Some(*new_z);
                }
            }
            Operation::SwapPositionOnSegment { ids: [x, y] } => {
                let (xx, xy, _) = resolve_point(section, modifications, *x);
                let (yx, yy, _) = resolve_point(section, modifications, *y);
                let ex = next.entry(*x).or_default();
                ex.x = Some(yx);
                ex.y = Some(yy);
                let ey = next.entry(*y).or_default();
                ey.x = Some(xx);
                ey.y = Some(xy);
            }
        }
        next
    }
}

/// Whether every point an operation would touch sits on a mutable segment.
/// Operations that would touch an immutable segment are filtered out here,
/// in the issue→operation mapping.
fn ids_are_mutable(section: &UnravelSection, ids: &[SegmentPointId]) -> bool {
    ids.iter()
        .all(|id| section.is_mutable_segment(section.segment_point(*id).segment_id()))
}

/// Enumerate the candidate operations for a single issue. Only
/// operations whose targeted points all sit on mutable segments are
/// emitted.
#[must_use]
pub fn operations_for_issue(section: &UnravelSection, issue: &UnravelIssue) -> Vec<Operation> {
    match issue {
        UnravelIssue::TransitionVia { points: [a, b], .. } => {
            let mut ops = Vec::new();
            let a_point = section.segment_point(*a);
            let b_point = section.segment_point(*b);
            if section.is_mutable_segment(a_point.segment_id()) {
                ops.push(Operation::ChangeLayer {
                    new_z: b_point.z(),
                    ids: vec![*a],
                });
            }
            if section.is_mutable_segment(b_point.segment_id()) {
                ops.push(Operation::ChangeLayer {
                    new_z: a_point.z(),
                    ids: vec![*b],
                });
            }
            ops
        }
        UnravelIssue::SameLayerCrossing {
            crossing_line_1: [a, b],
            crossing_line_2: [c, d],
            ..
        } => {
            let mut ops = Vec::new();

            // Swaps across segment-sharing pairs from the two crossing lines.
            for (x, y) in [(*a, *c), (*a, *d), (*b, *c), (*b, *d)] {
                let x_seg = section.segment_point(x).segment_id();
                let y_seg = section.segment_point(y).segment_id();
                if x_seg == y_seg && ids_are_mutable(section, &[x, y]) {
                    ops.push(Operation::SwapPositionOnSegment { ids: [x, y] });
                }
            }

            // Whole-segment-pair layer flips.
            if ids_are_mutable(section, &[*a, *b]) {
                let new_z = if section.segment_point(*a).z() == 0 { 1 } else { 0 };
                ops.push(Operation::ChangeLayer {
                    new_z,
                    ids: vec![*a, *b],
                });
            }
            if ids_are_mutable(section, &[*c, *d]) {
                let new_z = if section.segment_point(*c).z() == 0 { 1 } else { 0 };
                ops.push(Operation::ChangeLayer {
                    new_z,
                    ids: vec![*c, *d],
                });
            }

            // Individual flips.
            for &p in [a, b, c, d].iter() {
                if ids_are_mutable(section, &[*p]) {
                    let new_z = if section.segment_point(*p).z() == 0 { 1 } else { 0 };
                    ops.push(Operation::ChangeLayer {
                        new_z,
                        ids: vec![*p],
                    });
                }
            }

            ops
        }
        UnravelIssue::SingleTransitionCrossing { .. }
        | UnravelIssue::DoubleTransitionCrossing { .. }
        | UnravelIssue::SameLayerTraceImbalanceWithLowCapacity { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ids::CellId;
    use crate::section::SegmentPoint;
    use std::collections::{HashMap, HashSet};

    /// One node, two points on distinct segments — `seg_a` mutable,
    /// `seg_b` not — at different `z`, so a `TransitionVia` issue applies.
    fn transition_fixture() -> (UnravelSection, SegmentPointId, SegmentPointId) {
        let node = CellId::new(0);
        let seg_a = SegmentId::new(0);
        let seg_b = SegmentId::new(1);
        let a = SegmentPointId::new(0);
        let b = SegmentPointId::new(1);
        let points = vec![
            SegmentPoint::new(a, seg_a, [node, node], 0.0, 0.0, 0, "netA".into()),
            SegmentPoint::new(b, seg_b, [node, node], 10.0, 10.0, 1, "netA".into()),
        ];
        let section = UnravelSection {
            root_node_id: node,
            all_node_ids: HashSet::from([node]),
            mutable_node_ids: HashSet::from([node]),
            immutable_node_ids: HashSet::new(),
            mutable_segment_ids: HashSet::from([seg_a]),
            segment_points: points,
            segment_points_in_node: HashMap::new(),
            segment_points_in_segment: HashMap::new(),
            segment_pairs_in_node: HashMap::new(),
        };
        (section, a, b)
    }

    #[test]
    fn test_transition_via_ops_filtered_to_mutable_segment() {
        let (section, a, b) = transition_fixture();
        let issue = UnravelIssue::TransitionVia {
            points: [a, b],
            node_id: CellId::new(0),
        };
        let ops = operations_for_issue(&section, &issue);
        // Only `a` sits on the mutable segment; the op touching `b` must
        // be filtered out.
        assert_eq!(ops.len(), 1);
        match &ops[0] {
            Operation::ChangeLayer { ids, .. } => assert_eq!(ids, &vec![a]),
            Operation::SwapPositionOnSegment { .. } => panic!("unexpected op kind"),
        }
    }

    #[test]
    fn test_ids_are_mutable() {
        let (section, a, b) = transition_fixture();
        assert!(ids_are_mutable(&section, &[a]));
        assert!(!ids_are_mutable(&section, &[b]));
        assert!(!ids_are_mutable(&section, &[a, b]));
    }

    #[test]
    fn test_change_layer_apply_sets_z_only() {
        let (section, a, _b) = transition_fixture();
        let op = Operation::ChangeLayer {
            new_z: 1,
            ids: vec![a],
        };
        let mods = op.apply(&section, &PointModifications::default());
        let (x, y, z) = resolve_point(&section, &mods, a);
        assert_eq!((x, y, z), (0.0, 0.0, 1));
    }

    #[test]
    fn test_swap_position_on_segment_exchanges_coordinates() {
        let (section, a, b) = transition_fixture();
        let op = Operation::SwapPositionOnSegment { ids: [a, b] };
        let mods = op.apply(&section, &PointModifications::default());
        let (ax, ay, az) = resolve_point(&section, &mods, a);
        let (bx, by, bz) = resolve_point(&section, &mods, b);
        assert_eq!((ax, ay), (10.0, 10.0));
        assert_eq!((bx, by), (0.0, 0.0));
        // z is untouched by a position swap.
        assert_eq!(az, 0);
        assert_eq!(bz, 1);
    }

    /// Property 6 (swap involution): applying the same swap twice returns
    /// each point to its original coordinates.
    #[test]
    fn test_swap_is_involutive() {
        let (section, a, b) = transition_fixture();
        let op = Operation::SwapPositionOnSegment { ids: [a, b] };
        let once = op.apply(&section, &PointModifications::default());
        let twice = op.apply(&section, &once);
        let (ax, ay, _) = resolve_point(&section, &twice, a);
        let (bx, by, _) = resolve_point(&section, &twice, b);
        assert_eq!((ax, ay), (0.0, 0.0));
        assert_eq!((bx, by), (10.0, 10.0));
    }
}
