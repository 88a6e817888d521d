use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashSet;

use crate::config::{CostCoefficients, MeshConfig, SolverConfig};
use crate::mesh::Mesh;
use crate::section::UnravelSection;
use crate::unravel::candidate::UnravelCandidate;
use crate::unravel::operation::{Operation, PointModifications};

use super::operation::operations_for_issue;

/// Consecutive non-improving pops after which the neighbor cap relaxes
/// from "one `change_layer` per issue" to the full operation set.
const NEIGHBOR_CAP_STALL_THRESHOLD: u32 = 20;

/// Whether [`Solver::step`] did work, or the search has terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    Done,
}

/// A min-heap entry over `f`, breaking ties by insertion order
/// (FIFO-with-priority). Modeled on the `SmallestCostHolder` pattern from
/// an A* pathfinder.
struct QueueEntry {
    f: f64,
    insertion_order: u64,
    index: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.insertion_order == other.insertion_order
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.f.partial_cmp(&self.f).expect("candidate cost is finite") {
            Ordering::Equal => other.insertion_order.cmp(&self.insertion_order),
            ord => ord,
        }
    }
}

/// A best-first search over point-modification overlays, rearranging
/// crossing-point assignments to eliminate issues. Stepwise:
/// [`Solver::step`] expands one candidate and returns.
pub struct Solver<'a> {
    section: &'a UnravelSection,
    mesh: &'a Mesh,
    mesh_config: MeshConfig,
    coefficients: CostCoefficients,
    max_iterations: u32,

    arena: Vec<UnravelCandidate>,
    heap: BinaryHeap<QueueEntry>,
    visited_hash: FxHashSet<u64>,
    visited_full_hash: FxHashSet<u64>,
    next_insertion_order: u64,
    iterations: u32,
    stall_counter: u32,

    original_index: usize,
    best_index: usize,
    last_processed_index: Option<usize>,
}

impl<'a> Solver<'a> {
    #[must_use]
    pub fn new(
        section: &'a UnravelSection,
        mesh: &'a Mesh,
        mesh_config: MeshConfig,
        solver_config: SolverConfig,
        coefficients: CostCoefficients,
    ) -> Self {
        let initial = UnravelCandidate::new(
            section,
            mesh,
            &mesh_config,
            &coefficients,
            PointModifications::default(),
            0,
        );

        let mut visited_hash = FxHashSet::default();
        let mut visited_full_hash = FxHashSet::default();
        visited_hash.insert(initial.candidate_hash());
        visited_full_hash.insert(initial.candidate_full_hash());

        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry {
            f: initial.f(),
            insertion_order: 0,
            index: 0,
        });

        Self {
            section,
            mesh,
            mesh_config,
            coefficients,
            max_iterations: solver_config.max_iterations,
            arena: vec![initial],
            heap,
            visited_hash,
            visited_full_hash,
            next_insertion_order: 1,
            iterations: 0,
            stall_counter: 0,
            original_index: 0,
            best_index: 0,
            last_processed_index: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn original_candidate(&self) -> &UnravelCandidate {
        &self.arena[self.original_index]
    }

    #[inline]
    #[must_use]
    pub fn best_candidate(&self) -> &UnravelCandidate {
        &self.arena[self.best_index]
    }

    #[inline]
    #[must_use]
    pub fn last_processed_candidate(&self) -> Option<&UnravelCandidate> {
        self.last_processed_index.map(|i| &self.arena[i])
    }

    /// Perform one unit of work: pop the head candidate, update the
    /// incumbent, and enqueue its neighbors.
    pub fn step(&mut self) -> StepResult {
        if self.iterations >= self.max_iterations {
            return StepResult::Done;
        }
        let Some(entry) = self.heap.pop() else {
            return StepResult::Done;
        };
        self.iterations += 1;
        self.last_processed_index = Some(entry.index);

        if self.arena[entry.index].f() < self.arena[self.best_index].f() {
            self.best_index = entry.index;
            self.stall_counter = 0;
        } else {
            self.stall_counter += 1;
        }

        let allow_full_ops = self.stall_counter >= NEIGHBOR_CAP_STALL_THRESHOLD;
        let issues = self.arena[entry.index].issues().to_vec();
        let base_mods = self.arena[entry.index].point_modifications().clone();
        let operations_performed = self.arena[entry.index].operations_performed();

        for issue in &issues {
            let ops = self.capped_operations(issue, allow_full_ops);
            for op in ops {
                self.expand(&op, &base_mods, operations_performed + 1);
            }
        }

        tracing::debug!(
            iteration = self.iterations,
            issues = self.arena[entry.index].issues().len(),
            best_f = self.arena[self.best_index].f(),
            "unravel step"
        );

        StepResult::Continue
    }

    fn capped_operations(
        &self,
        issue: &crate::unravel::issue::UnravelIssue,
        allow_full_ops: bool,
    ) -> Vec<Operation> {
        let ops = operations_for_issue(self.section, issue);
        if allow_full_ops {
            ops
        } else {
            ops.into_iter()
                .filter(|op| matches!(op, Operation::ChangeLayer { .. }))
                .take(1)
                .collect()
        }
    }

    fn expand(&mut self, op: &Operation, base_mods: &PointModifications, operations_performed: u32) {
        let next_mods = op.apply(self.section, base_mods);
        let candidate = UnravelCandidate::new(
            self.section,
            self.mesh,
            &self.mesh_config,
            &self.coefficients,
            next_mods,
            operations_performed,
        );

        if self.visited_hash.contains(&candidate.candidate_hash())
            || self.visited_full_hash.contains(&candidate.candidate_full_hash())
        {
            return;
        }
        self.visited_hash.insert(candidate.candidate_hash());
        self.visited_full_hash.insert(candidate.candidate_full_hash());

        let index = self.arena.len();
        let f = candidate.f();
        self.arena.push(candidate);
        let insertion_order = self.next_insertion_order;
        self.next_insertion_order += 1;
        self.heap.push(QueueEntry {
            f,
            insertion_order,
            index,
        });
    }

    /// Run [`Self::step`] to completion and return the best candidate
    /// found.
    pub fn build(mut self) -> UnravelCandidate {
        while self.step() == StepResult::Continue {}
        self.arena.swap_remove(self.best_index)
    }
}
