//! Best-first search over trace-crossing point assignments, eliminating
//! same-layer crossings and minimizing vias under a probabilistic cost
//! model.

mod candidate;
mod cost;
mod detect;
mod issue;
mod operation;
mod solver;

pub use candidate::UnravelCandidate;
pub use cost::{compute_g, log_probability, tuned_total_capacity};
pub use detect::get_issues_in_section;
pub use issue::UnravelIssue;
pub use operation::{operations_for_issue, resolve_point, Operation, PointModifications, PointOverride};
pub use solver::{Solver, StepResult};
