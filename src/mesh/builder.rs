use super::cell::{AvailableZ, Cell};
use super::segment::Segment;
use crate::config::MeshConfig;
use crate::geometry::{point_in_rect, rect_fully_covered, rects_overlap, LineSeg, Point, Rect, Z};
use crate::ids::{CellId, IdCounter, SegmentId};
use crate::input::SimpleRouteJson;

use std::collections::HashMap;

const EPS: f64 = 1e-9;

#[inline]
fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS
}

struct ObstacleShape {
    rect: Rect,
    available_z: AvailableZ,
    // kept for visualization / future use; not read by the core algorithm.
    #[allow(dead_code)]
    connected_to: Vec<String>,
}

#[derive(Clone)]
struct Target {
    point: Point,
    z: Z,
    connection_name: String,
}

/// A quadrant child that has been classified but not yet committed to the
/// arena (it may still be discarded, replaced by z-subdivision siblings,
/// pushed back onto the worklist, or finalized as a leaf).
struct Pending {
    rect: Rect,
    available_z: AvailableZ,
    depth: u32,
    contains_obstacle: bool,
    completely_inside_obstacle: bool,
    contains_target: bool,
    target_connection_name: Option<String>,
    parent: CellId,
}

/// The finished capacity mesh: the arena of retained cells, the leaf
/// (`finished`) subset, and the derived segment adjacency.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    cells: Vec<Cell>,
    finished: Vec<CellId>,
    segments: Vec<Segment>,
    node_id_to_segment_ids: HashMap<CellId, Vec<SegmentId>>,
    segment_id_to_node_ids: HashMap<SegmentId, [CellId; 2]>,
}

impl Mesh {
    #[inline]
    #[must_use]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.value() as usize]
    }

    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The leaf cells that make up the routable mesh.
    #[inline]
    #[must_use]
    pub fn finished(&self) -> &[CellId] {
        &self.finished
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.value() as usize]
    }

    #[inline]
    #[must_use]
    pub fn node_id_to_segment_ids(&self) -> &HashMap<CellId, Vec<SegmentId>> {
        &self.node_id_to_segment_ids
    }

    #[inline]
    #[must_use]
    pub fn segment_id_to_node_ids(&self) -> &HashMap<SegmentId, [CellId; 2]> {
        &self.segment_id_to_node_ids
    }
}

/// Whether a single [`MeshBuilder::step`] call did work, or the mesh is
/// complete: performs one unit of work and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    Done,
}

/// Builds a [`Mesh`] by adaptive quad-tree subdivision of the board's
/// bounds. Stepwise: [`MeshBuilder::step`] pops one
/// unfinished cell and produces its children; [`MeshBuilder::build`] is a
/// convenience loop for callers that do not need to interleave steps.
pub struct MeshBuilder {
    config: MeshConfig,
    obstacles: Vec<ObstacleShape>,
    targets: Vec<Target>,
    unfinished: Vec<CellId>,
    mesh: Mesh,
    id_counter: IdCounter,
    seg_id_counter: IdCounter,
    adjacency_built: bool,
}

impl MeshBuilder {
    /// Construct a builder for an already-[`SimpleRouteJson::validate`]d
    /// board.
    #[must_use]
    pub fn new(board: &SimpleRouteJson, config: MeshConfig) -> Self {
        let layer_map = board.layer_map();
        let obstacles = board
            .obstacles
            .iter()
            .map(|o| ObstacleShape {
                rect: o.rect(),
                available_z: AvailableZ::from_zs(
                    o.layers
                        .iter()
                        .filter_map(|name| layer_map.layer_name_to_z(name)),
                ),
                connected_to: o.connected_to.clone(),
            })
            .collect();

        let mut targets = Vec::new();
        for connection in &board.connections {
            for p in &connection.points_to_connect {
                targets.push(Target {
                    point: Point::new(p.x, p.y),
                    z: p.layer as Z,
                    connection_name: connection.name.clone(),
                });
            }
        }

        let mut builder = Self {
            config,
            obstacles,
            targets,
            unfinished: Vec::new(),
            mesh: Mesh::default(),
            id_counter: IdCounter::new(),
            seg_id_counter: IdCounter::new(),
            adjacency_built: false,
        };

        let root_id = builder.mint_cell(
            board.bounds.as_rect(),
            AvailableZ::BOTH,
            0,
            false,
            false,
            false,
            None,
            None,
        );
        builder.unfinished.push(root_id);

        builder
    }

    #[allow(clippy::too_many_arguments)]
    fn mint_cell(
        &mut self,
        rect: Rect,
        available_z: AvailableZ,
        depth: u32,
        contains_obstacle: bool,
        completely_inside_obstacle: bool,
        contains_target: bool,
        target_connection_name: Option<String>,
        parent: Option<CellId>,
    ) -> CellId {
        let id = self.id_counter.next(CellId::new);
        debug_assert_eq!(id.value() as usize, self.mesh.cells.len());
        self.mesh.cells.push(Cell::new(
            id,
            rect,
            available_z,
            depth,
            contains_obstacle,
            completely_inside_obstacle,
            contains_target,
            target_connection_name,
            parent,
        ));
        id
    }

    fn contains_obstacle(&self, rect: &Rect) -> bool {
        self.obstacles.iter().any(|o| rects_overlap(&o.rect, rect))
    }

    fn covered_on_z(&self, rect: &Rect, z: Z) -> bool {
        let covers: Vec<Rect> = self
            .obstacles
            .iter()
            .filter(|o| o.available_z.contains(z) && rects_overlap(&o.rect, rect))
            .map(|o| o.rect)
            .collect();
        if covers.is_empty() {
            return false;
        }
        rect_fully_covered(rect, &covers)
    }

    fn completely_inside_for(&self, rect: &Rect, available_z: AvailableZ) -> bool {
        available_z.iter().all(|z| self.covered_on_z(rect, z))
    }

    /// The first target (in input order) whose point falls in `rect`.
    fn target_in(&self, rect: &Rect) -> Option<&Target> {
        self.targets.iter().find(|t| point_in_rect(t.point, rect))
    }

    /// Classify a candidate rect at the given available layers: returns
    /// `(contains_obstacle, completely_inside_obstacle, contains_target,
    /// target_connection_name, target_z)`.
    #[allow(clippy::type_complexity)]
    fn classify(
        &self,
        rect: &Rect,
        available_z: AvailableZ,
    ) -> (bool, bool, bool, Option<String>, Option<Z>) {
        let contains_obstacle = self.contains_obstacle(rect);
        let completely_inside = self.completely_inside_for(rect, available_z);
        match self.target_in(rect) {
            Some(t) => (
                contains_obstacle,
                completely_inside,
                true,
                Some(t.connection_name.clone()),
                Some(t.z),
            ),
            None => (contains_obstacle, completely_inside, false, None, None),
        }
    }

    /// Z-subdivision: one cell per currently available layer, filtered
    /// to those for which `shouldBeInGraph` holds.
    fn z_subdivide(
        &self,
        rect: &Rect,
        available_z: AvailableZ,
        depth: u32,
        parent: CellId,
    ) -> Vec<Pending> {
        available_z
            .iter()
            .filter_map(|z| {
                let single = AvailableZ::single(z);
                let (contains_obstacle, completely_inside, contains_target, target_name, _) =
                    self.classify(rect, single);
                let should_be_in_graph = !completely_inside || contains_target;
                if !should_be_in_graph {
                    return None;
                }
                Some(Pending {
                    rect: *rect,
                    available_z: single,
                    depth,
                    contains_obstacle,
                    completely_inside_obstacle: completely_inside,
                    contains_target,
                    target_connection_name: target_name,
                    parent,
                })
            })
            .collect()
    }

    /// Decide whether a retained pending cell should be pushed back to the
    /// worklist (xy-subdivided further) or finalized as a leaf.
    fn finalize_or_subdivide(&mut self, pending: Pending) {
        let should_xy_subdivide = (pending.contains_target
            || (pending.contains_obstacle && !pending.completely_inside_obstacle)
            || pending.available_z.len() == 1)
            && pending.depth < self.config.max_depth as u32;

        if should_xy_subdivide {
            let id = self.mint_cell(
                pending.rect,
                pending.available_z,
                pending.depth,
                pending.contains_obstacle,
                pending.completely_inside_obstacle,
                pending.contains_target,
                pending.target_connection_name,
                Some(pending.parent),
            );
            self.unfinished.push(id);
            return;
        }

        if !pending.contains_obstacle || pending.contains_target {
            self.finalize(pending);
            return;
        }

        if pending.available_z.len() > 1 {
            for sibling in
                self.z_subdivide(&pending.rect, pending.available_z, pending.depth, pending.parent)
            {
                self.finalize(sibling);
            }
            return;
        }

        // Mesh exhaustion: max depth reached, single layer, still an
        // obstacle, no target. Finalize as-is; the downstream router
        // handles it.
        tracing::warn!(
            depth = pending.depth,
            "mesh exhaustion: finalizing single-layer obstacle cell at max depth"
        );
        self.finalize(pending);
    }

    fn finalize(&mut self, pending: Pending) {
        let id = self.mint_cell(
            pending.rect,
            pending.available_z,
            pending.depth,
            pending.contains_obstacle,
            pending.completely_inside_obstacle,
            pending.contains_target,
            pending.target_connection_name,
            Some(pending.parent),
        );
        self.mesh.finished.push(id);
    }

    fn subdivide(&mut self, parent_id: CellId) {
        let parent_rect = *self.mesh.cell(parent_id).rect();
        let parent_depth = self.mesh.cell(parent_id).depth();

        for quadrant_rect in parent_rect.split_quadrants() {
            let mut available_z = AvailableZ::BOTH;
            let (mut contains_obstacle, mut completely_inside, contains_target, target_name, target_z) =
                self.classify(&quadrant_rect, available_z);

            if contains_target {
                let target_zv = target_z.expect("target z set with target");
                let narrowed =
                    AvailableZ::from_zs(available_z.iter().filter(|&z| {
                        z == target_zv || !self.covered_on_z(&quadrant_rect, z)
                    }));
                if narrowed != available_z {
                    available_z = narrowed;
                    completely_inside = self.completely_inside_for(&quadrant_rect, available_z);
                    contains_obstacle = self.contains_obstacle(&quadrant_rect);
                }
            }

            let should_be_in_graph = !completely_inside || contains_target;

            if !should_be_in_graph {
                if available_z.len() > 1 {
                    let siblings =
                        self.z_subdivide(&quadrant_rect, available_z, parent_depth + 1, parent_id);
                    for sibling in siblings {
                        self.finalize_or_subdivide(sibling);
                    }
                }
                continue;
            }

            let pending = Pending {
                rect: quadrant_rect,
                available_z,
                depth: parent_depth + 1,
                contains_obstacle,
                completely_inside_obstacle: completely_inside,
                contains_target,
                target_connection_name: target_name,
                parent: parent_id,
            };
            self.finalize_or_subdivide(pending);
        }
    }

    /// Perform one unit of work: pop one unfinished cell and produce its
    /// children, or (if the worklist is empty) finalize adjacency and
    /// report completion.
    pub fn step(&mut self) -> StepResult {
        match self.unfinished.pop() {
            Some(parent_id) => {
                self.subdivide(parent_id);
                StepResult::Continue
            }
            None => {
                if !self.adjacency_built {
                    self.build_adjacency();
                    self.adjacency_built = true;
                }
                StepResult::Done
            }
        }
    }

    /// Run [`Self::step`] to completion and return the finished [`Mesh`].
    pub fn build(mut self) -> Mesh {
        while self.step() == StepResult::Continue {}
        self.mesh
    }

    fn build_adjacency(&mut self) {
        let finished = self.mesh.finished.clone();
        for i in 0..finished.len() {
            for j in (i + 1)..finished.len() {
                let a_id = finished[i];
                let b_id = finished[j];
                let a = self.mesh.cell(a_id);
                let b = self.mesh.cell(b_id);
                if !a.available_z().overlaps(&b.available_z()) {
                    continue;
                }
                if let Some(boundary) = shared_boundary(a.rect(), b.rect()) {
                    let seg_id = self.seg_id_counter.next(SegmentId::new);
                    let segment = Segment::new(seg_id, [a_id, b_id], boundary);
                    self.mesh.segments.push(segment);
                    self.mesh
                        .segment_id_to_node_ids
                        .insert(seg_id, [a_id, b_id]);
                    self.mesh
                        .node_id_to_segment_ids
                        .entry(a_id)
                        .or_default()
                        .push(seg_id);
                    self.mesh
                        .node_id_to_segment_ids
                        .entry(b_id)
                        .or_default()
                        .push(seg_id);
                }
            }
        }
    }
}

/// The shared boundary between two axis-aligned rects, if they touch along
/// an edge of positive length.
fn shared_boundary(a: &Rect, b: &Rect) -> Option<LineSeg> {
    let a_min = a.min();
    let a_max = a.max();
    let b_min = b.min();
    let b_max = b.max();

    if approx_eq(a_max.y, b_min.y) || approx_eq(b_max.y, a_min.y) {
        let y = if approx_eq(a_max.y, b_min.y) {
            a_max.y
        } else {
            a_min.y
        };
        let x0 = a_min.x.max(b_min.x);
        let x1 = a_max.x.min(b_max.x);
        if x1 - x0 > EPS {
            return Some(LineSeg::new(Point::new(x0, y), Point::new(x1, y)));
        }
    }

    if approx_eq(a_max.x, b_min.x) || approx_eq(b_max.x, a_min.x) {
        let x = if approx_eq(a_max.x, b_min.x) {
            a_max.x
        } else {
            a_min.x
        };
        let y0 = a_min.y.max(b_min.y);
        let y1 = a_max.y.min(b_max.y);
        if y1 - y0 > EPS {
            return Some(LineSeg::new(Point::new(x, y0), Point::new(x, y1)));
        }
    }

    None
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::{Bounds, CenterPoint, Connection, ConnectionPoint, Obstacle};

    fn empty_board(size: f64) -> SimpleRouteJson {
        SimpleRouteJson {
            bounds: Bounds {
                min_x: 0.0,
                max_x: size,
                min_y: 0.0,
                max_y: size,
            },
            layer_count: 2,
            min_trace_width: 0.2,
            obstacles: vec![],
            connections: vec![],
        }
    }

    #[test]
    fn test_build_empty_board_single_leaf() {
        let board = empty_board(100.0);
        let builder = MeshBuilder::new(&board, MeshConfig::new(4, 0.2));
        let mesh = builder.build();
        // No obstacle, no target anywhere -> root's children are all
        // obstacle-free and immediately finalized.
        assert_eq!(mesh.finished().len(), 4);
        for id in mesh.finished() {
            let cell = mesh.cell(*id);
            assert!(!cell.contains_obstacle());
            assert_eq!(cell.available_z().len(), 2);
        }
    }

    #[test]
    fn test_containment_invariant() {
        let mut board = empty_board(100.0);
        board.obstacles.push(Obstacle {
            center: CenterPoint { x: 50.0, y: 50.0 },
            width: 20.0,
            height: 20.0,
            kind: "rect".to_string(),
            layers: vec!["top".to_string(), "bottom".to_string()],
            connected_to: vec![],
        });
        let builder = MeshBuilder::new(&board, MeshConfig::new(6, 0.2));
        let mesh = builder.build();
        let bounds = board.bounds.as_rect();
        for id in mesh.finished() {
            let cell = mesh.cell(*id);
            let min = cell.rect().min();
            let max = cell.rect().max();
            let bmin = bounds.min();
            let bmax = bounds.max();
            assert!(min.x >= bmin.x - EPS && min.y >= bmin.y - EPS);
            assert!(max.x <= bmax.x + EPS && max.y <= bmax.y + EPS);

            let fully_obstructed = cell.completely_inside_obstacle();
            assert!(!fully_obstructed || cell.contains_target() || cell.available_z().len() == 1);
        }
    }

    #[test]
    fn test_target_inside_obstacle_retained() {
        // A connection endpoint lies inside an obstacle that leaves
        // layer 1 free.
        let mut board = empty_board(100.0);
        board.obstacles.push(Obstacle {
            center: CenterPoint { x: 50.0, y: 50.0 },
            width: 20.0,
            height: 20.0,
            kind: "rect".to_string(),
            layers: vec!["top".to_string()],
            connected_to: vec![],
        });
        board.connections.push(Connection {
            name: "net1".to_string(),
            points_to_connect: vec![
                ConnectionPoint {
                    x: 50.0,
                    y: 50.0,
                    layer: 1,
                },
                ConnectionPoint {
                    x: 10.0,
                    y: 10.0,
                    layer: 1,
                },
            ],
        });
        let builder = MeshBuilder::new(&board, MeshConfig::new(8, 0.2));
        let mesh = builder.build();

        let leaf = mesh
            .finished()
            .iter()
            .map(|id| mesh.cell(*id))
            .find(|c| c.contains_target() && c.target_connection_name() == Some("net1"))
            .expect("target cell retained");
        assert_eq!(leaf.available_z().only(), Some(1));
    }

    #[test]
    fn test_z_subdivision_under_single_layer_obstacle() {
        // A bottom-only obstacle should leave top-layer cells retained
        // beneath it.
        let mut board = empty_board(100.0);
        board.obstacles.push(Obstacle {
            center: CenterPoint { x: 50.0, y: 50.0 },
            width: 20.0,
            height: 20.0,
            kind: "rect".to_string(),
            layers: vec!["bottom".to_string()],
            connected_to: vec![],
        });
        let builder = MeshBuilder::new(&board, MeshConfig::new(8, 0.2));
        let mesh = builder.build();

        let has_single_layer_top_cell = mesh.finished().iter().any(|id| {
            let c = mesh.cell(*id);
            c.available_z().only() == Some(0) && rects_overlap(c.rect(), &board.obstacles[0].rect())
        });
        assert!(has_single_layer_top_cell);

        for id in mesh.finished() {
            let c = mesh.cell(*id);
            assert!(!c.completely_inside_obstacle() || c.contains_target());
        }
    }

    #[test]
    fn test_adjacency_segments_cover_shared_edges() {
        let board = empty_board(4.0);
        let builder = MeshBuilder::new(&board, MeshConfig::new(1, 0.2));
        let mesh = builder.build();
        // A single xy-subdivision of an obstacle-free board yields 4
        // quadrant leaves forming a 2x2 grid: 4 shared edges.
        assert_eq!(mesh.finished().len(), 4);
        assert_eq!(mesh.segments().len(), 4);
        for seg in mesh.segments() {
            assert!(seg.boundary().length() > 0.0);
        }
    }

    /// A small hand-built mesh used to drive the section/solver scenarios
    /// below without depending on the exact shape a board would subdivide
    /// into. Layout (five cells):
    ///
    /// ```text
    ///   root(x0-10) | a(x10-20) | b(x20-30) | d(x30-40)
    ///                            | c(x20-30,y50-100)
    /// ```
    ///
    /// `root` and `a` span the full height; `b` and `c` are stacked
    /// halves sharing the `y=50` boundary; `d` sits beside `b`. Segments:
    /// `root-a`, `a-b`, `b-c`, `b-d`.
    fn five_cell_fixture() -> Mesh {
        let mut mesh = Mesh::default();
        let cell = |id: u64, cx: f64, cy: f64, w: f64, h: f64, depth: u32| {
            Cell::new(
                CellId::new(id),
                Rect::new(Point::new(cx, cy), w, h),
                AvailableZ::BOTH,
                depth,
                false,
                false,
                false,
                None,
                None,
            )
        };
        mesh.cells.push(cell(0, 5.0, 50.0, 10.0, 100.0, 0)); // root
        mesh.cells.push(cell(1, 15.0, 50.0, 10.0, 100.0, 1)); // a
        mesh.cells.push(cell(2, 25.0, 25.0, 10.0, 50.0, 2)); // b
        mesh.cells.push(cell(3, 25.0, 75.0, 10.0, 50.0, 2)); // c
        mesh.cells.push(cell(4, 35.0, 25.0, 10.0, 50.0, 2)); // d
        mesh.finished = (0..5).map(CellId::new).collect();

        let seg = |id: u64, cells: [u64; 2], a: (f64, f64), b: (f64, f64)| {
            Segment::new(
                SegmentId::new(id),
                [CellId::new(cells[0]), CellId::new(cells[1])],
                LineSeg::new(Point::new(a.0, a.1), Point::new(b.0, b.1)),
            )
        };
        mesh.segments.push(seg(0, [0, 1], (10.0, 0.0), (10.0, 100.0))); // root-a
        mesh.segments.push(seg(1, [1, 2], (20.0, 0.0), (20.0, 50.0))); // a-b
        mesh.segments.push(seg(2, [2, 3], (20.0, 50.0), (30.0, 50.0))); // b-c
        mesh.segments.push(seg(3, [2, 4], (30.0, 0.0), (30.0, 50.0))); // b-d

        for seg in &mesh.segments {
            let [x, y] = seg.cells();
            mesh.node_id_to_segment_ids.entry(x).or_default().push(seg.id());
            mesh.node_id_to_segment_ids.entry(y).or_default().push(seg.id());
            mesh.segment_id_to_node_ids.insert(seg.id(), [x, y]);
        }
        mesh
    }

    /// Two same-layer nets crossing inside cell `a`, whose two segments
    /// (`root-a`, `a-b`) are both within the mutable radius. The solver
    /// should find a neighbor at least as good as the original.
    #[test]
    fn test_same_layer_crossing_is_resolvable() {
        use crate::config::{CostCoefficients, SolverConfig};
        use crate::section::{AssignedPoint, SectionBuilder};
        use crate::unravel::Solver;

        let mesh = five_cell_fixture();
        let mut assigned = HashMap::new();
        assigned.insert(
            SegmentId::new(0),
            vec![
                AssignedPoint {
                    x: 10.0,
                    y: 30.0,
                    z: 0,
                    connection_name: "netA".to_string(),
                },
                AssignedPoint {
                    x: 10.0,
                    y: 45.0,
                    z: 0,
                    connection_name: "netB".to_string(),
                },
            ],
        );
        assigned.insert(
            SegmentId::new(1),
            vec![
                AssignedPoint {
                    x: 20.0,
                    y: 20.0,
                    z: 0,
                    connection_name: "netA".to_string(),
                },
                AssignedPoint {
                    x: 20.0,
                    y: 5.0,
                    z: 0,
                    connection_name: "netB".to_string(),
                },
            ],
        );

        let section = SectionBuilder::new(&mesh, &assigned, 1).build(CellId::new(1));
        let solver = Solver::new(
            &section,
            &mesh,
            MeshConfig::default(),
            SolverConfig::default(),
            CostCoefficients::default(),
        );
        let original = solver.original_candidate().f();
        assert!(
            !solver.original_candidate().issues().is_empty(),
            "crossing nets should register an issue"
        );

        let best = solver.build();
        assert!(best.f() <= original, "solver must never worsen cost");
    }

    /// A transition via whose two crossing points both sit on segments
    /// outside the mutable radius. With no legal operation, the solver's
    /// best candidate must equal the original.
    #[test]
    fn test_unresolvable_via_on_immutable_segments() {
        use crate::config::{CostCoefficients, SolverConfig};
        use crate::section::{AssignedPoint, SectionBuilder};
        use crate::unravel::Solver;

        let mesh = five_cell_fixture();
        let mut assigned = HashMap::new();
        assigned.insert(
            SegmentId::new(2),
            vec![AssignedPoint {
                x: 25.0,
                y: 50.0,
                z: 0,
                connection_name: "netV".to_string(),
            }],
        );
        assigned.insert(
            SegmentId::new(3),
            vec![AssignedPoint {
                x: 30.0,
                y: 25.0,
                z: 1,
                connection_name: "netV".to_string(),
            }],
        );

        let section = SectionBuilder::new(&mesh, &assigned, 1).build(CellId::new(0));
        assert!(
            !section.is_mutable_segment(SegmentId::new(2)) && !section.is_mutable_segment(SegmentId::new(3)),
            "both of the via's segments must fall outside the mutable radius"
        );

        let solver = Solver::new(
            &section,
            &mesh,
            MeshConfig::default(),
            SolverConfig::default(),
            CostCoefficients::default(),
        );
        let original_hash = solver.original_candidate().candidate_full_hash();
        let best = solver.build();
        assert_eq!(
            best.candidate_full_hash(),
            original_hash,
            "an unreachable via must leave the best candidate unchanged"
        );
    }

    /// Applying the same `SwapPositionOnSegment` operation twice is an
    /// involution, restoring the original positions.
    #[test]
    fn test_swap_involution_and_dedup() {
        use crate::section::{AssignedPoint, SectionBuilder};
        use crate::unravel::{resolve_point, Operation, PointModifications};

        let mesh = five_cell_fixture();
        let mut assigned = HashMap::new();
        assigned.insert(
            SegmentId::new(0),
            vec![
                AssignedPoint {
                    x: 10.0,
                    y: 30.0,
                    z: 0,
                    connection_name: "netA".to_string(),
                },
                AssignedPoint {
                    x: 10.0,
                    y: 45.0,
                    z: 0,
                    connection_name: "netB".to_string(),
                },
            ],
        );
        let section = SectionBuilder::new(&mesh, &assigned, 1).build(CellId::new(0));

        let ids: Vec<_> = section.segment_points().iter().map(|p| p.id()).collect();
        let swap = Operation::SwapPositionOnSegment { ids: [ids[0], ids[1]] };

        let once = swap.apply(&section, &PointModifications::default());
        let twice = swap.apply(&section, &once);

        let (x0, y0, _) = resolve_point(&section, &PointModifications::default(), ids[0]);
        let (x0_back, y0_back, _) = resolve_point(&section, &twice, ids[0]);
        assert_eq!((x0, y0), (x0_back, y0_back));
    }
}
