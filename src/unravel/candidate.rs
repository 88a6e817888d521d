use std::hash::{Hash, Hasher};

use fxhash::FxHasher;

use crate::config::{CostCoefficients, MeshConfig};
use crate::mesh::Mesh;
use crate::section::UnravelSection;
use crate::unravel::cost::compute_g;
use crate::unravel::detect::get_issues_in_section;
use crate::unravel::issue::UnravelIssue;
use crate::unravel::operation::{resolve_point, PointModifications};

/// A search state: a modification overlay plus its derived issues and
/// cost. `h` is always zero in this design, so `f == g`
/// (greedy best-first).
#[derive(Debug, Clone)]
pub struct UnravelCandidate {
    point_modifications: PointModifications,
    issues: Vec<UnravelIssue>,
    g: f64,
    h: f64,
    f: f64,
    operations_performed: u32,
    candidate_hash: u64,
    candidate_full_hash: u64,
}

impl UnravelCandidate {
    /// Build a candidate from a modification overlay, evaluating its
    /// issues and cost against `section`.
    #[must_use]
    pub fn new(
        section: &UnravelSection,
        mesh: &Mesh,
        mesh_config: &MeshConfig,
        coefficients: &CostCoefficients,
        point_modifications: PointModifications,
        operations_performed: u32,
    ) -> Self {
        let issues = get_issues_in_section(section, &point_modifications);
        let g = compute_g(mesh, mesh_config, coefficients, &issues);
        let candidate_hash = modifications_hash(&point_modifications);
        let candidate_full_hash = full_state_hash(section, &point_modifications);
        Self {
            point_modifications,
            issues,
            g,
            h: 0.0,
            f: g,
            operations_performed,
            candidate_hash,
            candidate_full_hash,
        }
    }

    #[inline]
    #[must_use]
    pub fn point_modifications(&self) -> &PointModifications {
        &self.point_modifications
    }

    #[inline]
    #[must_use]
    pub fn issues(&self) -> &[UnravelIssue] {
        &self.issues
    }

    #[inline]
    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    #[inline]
    #[must_use]
    pub fn h(&self) -> f64 {
        self.h
    }

    #[inline]
    #[must_use]
    pub fn f(&self) -> f64 {
        self.f
    }

    #[inline]
    #[must_use]
    pub fn operations_performed(&self) -> u32 {
        self.operations_performed
    }

    #[inline]
    #[must_use]
    pub fn candidate_hash(&self) -> u64 {
        self.candidate_hash
    }

    #[inline]
    #[must_use]
    pub fn candidate_full_hash(&self) -> u64 {
        self.candidate_full_hash
    }
}

/// Cheap hash over the (sorted) modification entries; catches exact
/// duplicate search paths.
fn modifications_hash(modifications: &PointModifications) -> u64 {
    let mut entries: Vec<_> = modifications.iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort_by_key(|(id, _)| id.value());

    let mut hasher = FxHasher::default();
    for (id, ov) in entries {
        id.value().hash(&mut hasher);
        ov.x.map(f64::to_bits).hash(&mut hasher);
        ov.y.map(f64::to_bits).hash(&mut hasher);
        ov.z.hash(&mut hasher);
    }
    hasher.finish()
}

/// Hash over the fully-resolved point state; catches semantically
/// equivalent states reached via different operation histories.
fn full_state_hash(section: &UnravelSection, modifications: &PointModifications) -> u64 {
    let mut ids: Vec<_> = section.segment_points().iter().map(|p| p.id()).collect();
    ids.sort_by_key(|id| id.value());

    let mut hasher = FxHasher::default();
    for id in ids {
        let (x, y, z) = resolve_point(section, modifications, id);
        id.value().hash(&mut hasher);
        x.to_bits().hash(&mut hasher);
        y.to_bits().hash(&mut hasher);
        z.hash(&mut hasher);
    }
    hasher.finish()
}
