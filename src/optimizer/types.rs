use crate::domain::{DispatchSolution, ReleaseProblem};
use crate::error::DispatchError;

/// Seam between orchestration and solver backends. A strategy validates the
/// problem, solves it, and returns either a feasible optimal solution or an
/// error; it never returns a trajectory it cannot vouch for.
pub trait DispatchStrategy {
    fn solve(&self, problem: &ReleaseProblem) -> Result<DispatchSolution, DispatchError>;
}
