use crate::config::{CostCoefficients, MeshConfig};
use crate::ids::CellId;
use crate::mesh::Mesh;
use crate::unravel::issue::UnravelIssue;

use indexmap::IndexMap;

const EPS: f64 = 1e-9;

/// A deterministic function of a cell's geometry standing in for its
/// routing capacity — a deterministic function of the cell's width,
/// layer count, and min trace width. Memoizable per cell; this crate
/// recomputes it (cells are cheap `Copy` rects) rather than caching,
/// since candidates are short-lived.
#[must_use]
pub fn tuned_total_capacity(mesh: &Mesh, node_id: CellId, config: &MeshConfig) -> f64 {
    let cell = mesh.cell(node_id);
    let lane_width = config.min_trace_width.max(EPS);
    let lanes = (cell.rect().width().min(cell.rect().height()) / lane_width).floor();
    (lanes.max(1.0)) * cell.available_z().len() as f64
}

/// `logProbability`: a smooth, monotonic, non-decreasing mapping from an
/// estimated failure probability to a cost contribution. Values at or
/// under capacity (`estPf <= 1`) contribute zero; cost grows
/// logarithmically past that point, with negative outputs clipped to
/// zero.
#[must_use]
pub fn log_probability(est_pf: f64) -> f64 {
    est_pf.max(EPS).ln().max(0.0)
}

/// Sum the per-cell cost contributions over a list of issues
/// (`computeG`). `h` is always zero in this design, so `f == g`.
#[must_use]
pub fn compute_g(
    mesh: &Mesh,
    mesh_config: &MeshConfig,
    coefficients: &CostCoefficients,
    issues: &[UnravelIssue],
) -> f64 {
    // IndexMap rather than HashMap: summation order below must be
    // deterministic (insertion order, driven by the already-sorted issue
    // list) so that `g` reproduces bit-for-bit across runs.
    let mut per_cell: IndexMap<CellId, (u32, u32, u32)> = IndexMap::new();
    for issue in issues {
        let entry = per_cell.entry(issue.node_id()).or_default();
        match issue {
            UnravelIssue::TransitionVia { .. } => entry.0 += 1,
            UnravelIssue::SameLayerCrossing { .. } => entry.1 += 1,
            UnravelIssue::SingleTransitionCrossing { .. }
            | UnravelIssue::DoubleTransitionCrossing { .. } => entry.2 += 1,
            UnravelIssue::SameLayerTraceImbalanceWithLowCapacity { .. } => {}
        }
    }

    per_cell
        .into_iter()
        .map(|(node_id, (tc, sc, ec))| {
            let est_vias = coefficients.same_layer_crossing_weight * sc as f64
                + coefficients.transition_crossing_weight * ec as f64
                + coefficients.transition_via_weight * tc as f64;
            let est_used_capacity = (est_vias / 2.0).max(0.0).powf(coefficients.via_capacity_exponent);
            let capacity = tuned_total_capacity(mesh, node_id, mesh_config).max(EPS);
            let est_pf = est_used_capacity / capacity;
            log_probability(est_pf)
        })
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_log_probability_clips_negative() {
        assert_eq!(log_probability(0.0), 0.0);
        assert_eq!(log_probability(0.5), 0.0);
    }

    #[test]
    fn test_log_probability_positive_past_capacity() {
        assert!(log_probability(10.0) > 0.0);
    }

    #[test]
    fn test_compute_g_zero_for_no_issues() {
        let mesh = Mesh::default();
        let g = compute_g(
            &mesh,
            &MeshConfig::default(),
            &CostCoefficients::default(),
            &[],
        );
        assert_eq!(g, 0.0);
    }
}
