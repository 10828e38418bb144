//! Common surface of the optimization strategies.
//!
//! Both metaheuristics search the same space: one hub choice per order.
//! [`Strategy`] is the seam between the planning problem and a concrete
//! search loop, so callers can swap algorithms without touching the
//! domain code.

use crate::assign::Assignment;
use crate::error::PlanError;
use crate::problem::PlanningProblem;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Per-iteration progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration (or generation) number.
    pub iteration: usize,
    /// Best score found so far, including earlier iterations.
    pub best: f64,
    /// Average score of the candidates produced this iteration.
    pub average: f64,
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizeResult {
    /// The best assignment found during the entire run.
    pub best: Assignment,

    /// The hub choices that produce [`best`](Self::best) when realized.
    pub best_choices: Vec<usize>,

    /// Score of the best assignment.
    pub best_score: f64,

    /// Iterations actually executed.
    pub iterations: usize,

    /// Whether the run stopped early for lack of improvement.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// One entry per executed iteration.
    pub history: Vec<IterationStats>,
}

/// An optimization algorithm over hub-choice vectors.
///
/// If `cancel` is `Some` and the flag is set, the strategy stops at the
/// end of the current iteration and returns the best solution found so
/// far.
pub trait Strategy {
    fn optimize(
        &self,
        problem: &PlanningProblem,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizeResult, PlanError>;
}
