use crate::geometry::{LineSeg, Point, Z};
use crate::ids::CellId;
use crate::section::UnravelSection;
use crate::unravel::issue::UnravelIssue;
use crate::unravel::operation::{resolve_point, PointModifications};

/// `getIssuesInSection`: a pure function of the section and the
/// candidate's modifications. For each cell, evaluate its
/// directly-connected point pairs: a `z` mismatch within a pair is a
/// `transition_via`; two same-layer pairs whose lines cross is a
/// `same_layer_crossing`.
///
/// A `transition_via` pair additionally yields a transition-crossing
/// variant (see DESIGN.md for the rationale) when the line it would draw
/// on either endpoint's own layer crosses another same-layer pair's line
/// on that layer — one crossing layer gives `single`, both give
/// `double`.
#[must_use]
pub fn get_issues_in_section(
    section: &UnravelSection,
    modifications: &PointModifications,
) -> Vec<UnravelIssue> {
    let mut nodes: Vec<CellId> = section.all_node_ids().iter().copied().collect();
    nodes.sort_by_key(CellId::value);

    let mut issues = Vec::new();

    for node in nodes {
        let pairs = section.segment_pairs_in_node(node);

        let mut same_layer_lines: Vec<(Z, LineSeg, [crate::ids::SegmentPointId; 2])> = Vec::new();
        let mut transitions: Vec<(Point, Point, Z, Z, [crate::ids::SegmentPointId; 2])> =
            Vec::new();

        for &(a, b) in pairs {
            let (ax, ay, az) = resolve_point(section, modifications, a);
            let (bx, by, bz) = resolve_point(section, modifications, b);
            if az == bz {
                same_layer_lines.push((
                    az,
                    LineSeg::new(Point::new(ax, ay), Point::new(bx, by)),
                    [a, b],
                ));
            } else {
                issues.push(UnravelIssue::TransitionVia {
                    points: [a, b],
                    node_id: node,
                });
                transitions.push((
                    Point::new(ax, ay),
                    Point::new(bx, by),
                    az,
                    bz,
                    [a, b],
                ));
            }
        }

        for i in 0..same_layer_lines.len() {
            for j in (i + 1)..same_layer_lines.len() {
                let (z1, line1, ids1) = &same_layer_lines[i];
                let (z2, line2, ids2) = &same_layer_lines[j];
                if z1 != z2 {
                    continue;
                }
                if ids1.iter().any(|p| ids2.contains(p)) {
                    continue;
                }
                if line1.crosses(line2) {
                    issues.push(UnravelIssue::SameLayerCrossing {
                        crossing_line_1: *ids1,
                        crossing_line_2: *ids2,
                        node_id: node,
                    });
                }
            }
        }

        for (a_pos, b_pos, az, bz, _ids) in &transitions {
            let line = LineSeg::new(*a_pos, *b_pos);
            let crosses_a = same_layer_lines
                .iter()
                .any(|(z, l, _)| *z == *az && l.crosses(&line));
            let crosses_b = same_layer_lines
                .iter()
                .any(|(z, l, _)| *z == *bz && l.crosses(&line));
            match (crosses_a, crosses_b) {
                (true, true) => issues.push(UnravelIssue::DoubleTransitionCrossing { node_id: node }),
                (true, false) | (false, true) => {
                    issues.push(UnravelIssue::SingleTransitionCrossing { node_id: node })
                }
                (false, false) => {}
            }
        }
    }

    issues
}
