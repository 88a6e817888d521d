use crate::ids::{CellId, IdCounter, SegmentId, SegmentPointId};
use crate::mesh::Mesh;
use crate::section::section::UnravelSection;
use crate::section::segment_point::{AssignedPoint, SegmentPoint};

use std::collections::{HashMap, HashSet, VecDeque};

/// Builds an [`UnravelSection`] rooted on a cell, following a fixed
/// six-step construction order.
pub struct SectionBuilder<'a> {
    mesh: &'a Mesh,
    assigned: &'a HashMap<SegmentId, Vec<AssignedPoint>>,
    mutable_hops: u32,
}

impl<'a> SectionBuilder<'a> {
    #[must_use]
    pub fn new(
        mesh: &'a Mesh,
        assigned: &'a HashMap<SegmentId, Vec<AssignedPoint>>,
        mutable_hops: u32,
    ) -> Self {
        Self {
            mesh,
            assigned,
            mutable_hops,
        }
    }

    /// Build the section rooted on `root_node_id`.
    #[must_use]
    pub fn build(&self, root_node_id: CellId) -> UnravelSection {
        let depths = self.bfs_depths(root_node_id);

        let mutable_node_ids: HashSet<CellId> = depths
            .iter()
            .filter(|&(_, &d)| d <= self.mutable_hops)
            .map(|(&n, _)| n)
            .collect();
        let all_node_ids: HashSet<CellId> = depths
            .iter()
            .filter(|&(_, &d)| d <= self.mutable_hops + 1)
            .map(|(&n, _)| n)
            .collect();
        let immutable_node_ids: HashSet<CellId> = all_node_ids
            .difference(&mutable_node_ids)
            .copied()
            .collect();

        let (segment_points, segment_points_in_node, segment_points_in_segment) =
            self.collect_segment_points(&all_node_ids);

        let segment_points = self.compute_directly_connected(segment_points);

        let segment_pairs_in_node =
            self.compute_segment_pairs_in_node(&all_node_ids, &segment_points_in_node, &segment_points);

        let mutable_segment_ids: HashSet<SegmentId> = mutable_node_ids
            .iter()
            .flat_map(|n| {
                self.mesh
                    .node_id_to_segment_ids()
                    .get(n)
                    .into_iter()
                    .flatten()
                    .copied()
            })
            .collect();

        UnravelSection {
            root_node_id,
            all_node_ids,
            mutable_node_ids,
            immutable_node_ids,
            mutable_segment_ids,
            segment_points,
            segment_points_in_node,
            segment_points_in_segment,
            segment_pairs_in_node,
        }
    }

    /// BFS from `root`, alternating through nodes and segments, recording
    /// each reached node's hop distance. Capped at `mutable_hops + 1`.
    fn bfs_depths(&self, root: CellId) -> HashMap<CellId, u32> {
        let max_depth = self.mutable_hops + 1;
        let mut depths = HashMap::new();
        depths.insert(root, 0u32);
        let mut queue = VecDeque::new();
        queue.push_back((root, 0u32));

        while let Some((node, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            let Some(segment_ids) = self.mesh.node_id_to_segment_ids().get(&node) else {
                continue;
            };
            for &seg_id in segment_ids {
                let segment = self.mesh.segment(seg_id);
                if let Some(neighbor) = segment.other_cell(node) {
                    if !depths.contains_key(&neighbor) {
                        depths.insert(neighbor, depth + 1);
                        queue.push_back((neighbor, depth + 1));
                    }
                }
            }
        }

        depths
    }

    #[allow(clippy::type_complexity)]
    fn collect_segment_points(
        &self,
        all_node_ids: &HashSet<CellId>,
    ) -> (
        Vec<SegmentPoint>,
        HashMap<CellId, Vec<SegmentPointId>>,
        HashMap<SegmentId, Vec<SegmentPointId>>,
    ) {
        let mut id_counter = IdCounter::new();
        let mut segment_points = Vec::new();
        let mut segment_points_in_node: HashMap<CellId, Vec<SegmentPointId>> = HashMap::new();
        let mut segment_points_in_segment: HashMap<SegmentId, Vec<SegmentPointId>> = HashMap::new();

        for segment in self.mesh.segments() {
            let cells = segment.cells();
            if !cells.iter().any(|c| all_node_ids.contains(c)) {
                continue;
            }
            let Some(points) = self.assigned.get(&segment.id()) else {
                continue;
            };
            for p in points {
                let sp_id = id_counter.next(SegmentPointId::new);
                let sp = SegmentPoint::new(
                    sp_id,
                    segment.id(),
                    cells,
                    p.x,
                    p.y,
                    p.z,
                    p.connection_name.clone(),
                );
                for &node in &cells {
                    if all_node_ids.contains(&node) {
                        segment_points_in_node.entry(node).or_default().push(sp_id);
                    }
                }
                segment_points_in_segment
                    .entry(segment.id())
                    .or_default()
                    .push(sp_id);
                segment_points.push(sp);
            }
        }

        (segment_points, segment_points_in_node, segment_points_in_segment)
    }

    /// Step 4: `directlyConnectedSegmentPointIds` over all pairs `(A, B)`
    /// with distinct segments, the same connection name, and at least one
    /// shared incident cell. Symmetric.
    fn compute_directly_connected(&self, mut points: Vec<SegmentPoint>) -> Vec<SegmentPoint> {
        let n = points.len();
        let mut connected: Vec<Vec<SegmentPointId>> = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let a = &points[i];
                let b = &points[j];
                if a.segment_id() == b.segment_id() {
                    continue;
                }
                if a.connection_name() != b.connection_name() {
                    continue;
                }
                let shares_cell = a
                    .capacity_mesh_node_ids()
                    .iter()
                    .any(|n| b.capacity_mesh_node_ids().contains(n));
                if shares_cell {
                    connected[i].push(b.id());
                    connected[j].push(a.id());
                }
            }
        }
        for (i, p) in points.iter_mut().enumerate() {
            p.set_directly_connected(std::mem::take(&mut connected[i]));
        }
        points
    }

    /// Step 5: `segmentPairsInNode`, deduplicated unordered pairs of
    /// directly-connected points sharing a node.
    fn compute_segment_pairs_in_node(
        &self,
        all_node_ids: &HashSet<CellId>,
        segment_points_in_node: &HashMap<CellId, Vec<SegmentPointId>>,
        segment_points: &[SegmentPoint],
    ) -> HashMap<CellId, Vec<(SegmentPointId, SegmentPointId)>> {
        let mut result = HashMap::new();
        for &node in all_node_ids {
            let Some(ids) = segment_points_in_node.get(&node) else {
                continue;
            };
            let node_set: HashSet<SegmentPointId> = ids.iter().copied().collect();
            let mut seen = HashSet::new();
            let mut pairs = Vec::new();
            for &a_id in ids {
                let a = &segment_points[a_id.value() as usize];
                for &b_id in a.directly_connected_segment_point_ids() {
                    if !node_set.contains(&b_id) {
                        continue;
                    }
                    let key = if a_id.value() < b_id.value() {
                        (a_id, b_id)
                    } else {
                        (b_id, a_id)
                    };
                    if seen.insert(key) {
                        pairs.push(key);
                    }
                }
            }
            result.insert(node, pairs);
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::MeshConfig;
    use crate::input::{Bounds, SimpleRouteJson};
    use crate::mesh::MeshBuilder;

    fn empty_2x2_mesh() -> Mesh {
        let board = SimpleRouteJson {
            bounds: Bounds {
                min_x: 0.0,
                max_x: 100.0,
                min_y: 0.0,
                max_y: 100.0,
            },
            layer_count: 2,
            min_trace_width: 0.2,
            obstacles: vec![],
            connections: vec![],
        };
        MeshBuilder::new(&board, MeshConfig::new(1, 0.2)).build()
    }

    fn corner_and_its_segments(mesh: &Mesh) -> (CellId, Vec<SegmentId>) {
        let corner = *mesh
            .finished()
            .iter()
            .find(|&&id| mesh.node_id_to_segment_ids().get(&id).map(Vec::len) == Some(2))
            .expect("a 2x2 grid has a corner cell with two incident segments");
        let segs = mesh.node_id_to_segment_ids().get(&corner).unwrap().clone();
        (corner, segs)
    }

    #[test]
    fn test_root_alone_has_depth_zero_and_is_mutable() {
        let mesh = empty_2x2_mesh();
        let (corner, _) = corner_and_its_segments(&mesh);
        let assigned = HashMap::new();
        let section = SectionBuilder::new(&mesh, &assigned, 0).build(corner);
        assert_eq!(section.root_node_id(), corner);
        assert!(section.mutable_node_ids().contains(&corner));
        assert!(section.immutable_node_ids().is_empty() || !section.immutable_node_ids().contains(&corner));
    }

    #[test]
    fn test_directly_connected_points_share_a_segment_pair() {
        let mesh = empty_2x2_mesh();
        let (corner, segs) = corner_and_its_segments(&mesh);
        let seg_a = segs[0];
        let seg_b = segs[1];
        let boundary_a = mesh.segment(seg_a).boundary();
        let boundary_b = mesh.segment(seg_b).boundary();

        let mut assigned: HashMap<SegmentId, Vec<AssignedPoint>> = HashMap::new();
        assigned.insert(
            seg_a,
            vec![AssignedPoint {
                x: boundary_a.a.x,
                y: boundary_a.a.y,
                z: 0,
                connection_name: "netA".into(),
            }],
        );
        assigned.insert(
            seg_b,
            vec![AssignedPoint {
                x: boundary_b.a.x,
                y: boundary_b.a.y,
                z: 0,
                connection_name: "netA".into(),
            }],
        );

        let section = SectionBuilder::new(&mesh, &assigned, 1).build(corner);

        assert_eq!(section.segment_points().len(), 2);
        let pairs = section.segment_pairs_in_node(corner);
        assert_eq!(pairs.len(), 1);
        assert!(section.mutable_segment_ids().contains(&seg_a));
        assert!(section.mutable_segment_ids().contains(&seg_b));
    }

    #[test]
    fn test_unassigned_segments_contribute_no_points() {
        let mesh = empty_2x2_mesh();
        let (corner, _) = corner_and_its_segments(&mesh);
        let assigned = HashMap::new();
        let section = SectionBuilder::new(&mesh, &assigned, 1).build(corner);
        assert!(section.segment_points().is_empty());
        assert!(section.segment_pairs_in_node(corner).is_empty());
    }
}
