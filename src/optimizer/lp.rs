//! LP formulation of the release-scheduling problem.
//!
//! The objective and every constraint are linear in the releases, so the
//! schedule is solved exactly as a linear program: one box-bounded variable
//! per period, two scalar constraints for the aggregate budget, and two path
//! constraints per period for the reservoir level. The level itself is never
//! a variable; it is substituted out via its prefix-sum definition, leaving
//! constraints on the running sum of releases.

use good_lp::solvers::clarabel::clarabel;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
};
use tracing::{debug, info};

use crate::domain::{DispatchSolution, ReleaseProblem};
use crate::error::DispatchError;
use crate::optimizer::constraints::{level_trajectory, residuals};
use crate::optimizer::types::DispatchStrategy;

/// Exact LP solver for release schedules.
pub struct LpOptimizer {
    /// Feasibility tolerance applied when checking the returned trajectory.
    pub tolerance: f64,
}

impl Default for LpOptimizer {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

impl LpOptimizer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl DispatchStrategy for LpOptimizer {
    fn solve(&self, problem: &ReleaseProblem) -> Result<DispatchSolution, DispatchError> {
        problem.validate()?;
        let horizon = problem.horizon();

        if problem.initial_guess.is_some() {
            debug!("LP backend does not use a starting trajectory; initial_guess ignored");
        }

        let mut vars = variables!();
        let releases: Vec<Variable> = (0..horizon)
            .map(|t| {
                vars.add(
                    variable()
                        .min(problem.release_min[t])
                        .max(problem.release_max[t]),
                )
            })
            .collect();

        // Objective: maximize total revenue. The solver works directly on the
        // maximization; no sign flip needed.
        let mut revenue = Expression::from(0.0);
        for t in 0..horizon {
            revenue += problem.prices[t] * releases[t];
        }

        let mut model = vars.maximise(revenue).using(clarabel);

        // Aggregate release budget.
        let total: Expression = releases.iter().map(|&q| Expression::from(q)).sum();
        model = model.with(constraint!(total.clone() >= problem.total_release_min));
        model = model.with(constraint!(total <= problem.total_release_max));

        // Reservoir path constraints. With X[t] = x0 + cum_inflow[t] - cum_q[t]:
        //   X[t] >= level_min[t]  <=>  cum_q[t] <= x0 + cum_inflow[t] - level_min[t]
        //   X[t] <= level_max[t]  <=>  cum_q[t] >= x0 + cum_inflow[t] - level_max[t]
        let mut cum_inflow = 0.0;
        let mut cum_release = Expression::from(0.0);
        for t in 0..horizon {
            cum_inflow += problem.inflows[t];
            cum_release += releases[t];
            let available = problem.initial_level + cum_inflow;
            model = model.with(constraint!(
                cum_release.clone() <= available - problem.level_min[t]
            ));
            model = model.with(constraint!(
                cum_release.clone() >= available - problem.level_max[t]
            ));
        }

        let solution = model.solve().map_err(|err| match err {
            ResolutionError::Infeasible => DispatchError::Infeasible(
                "no release trajectory satisfies the reservoir and budget constraints".to_string(),
            ),
            other => DispatchError::Solver(other.to_string()),
        })?;

        let releases: Vec<f64> = releases.iter().map(|&q| solution.value(q)).collect();
        let levels = level_trajectory(problem, &releases);
        let payoff: f64 = releases
            .iter()
            .zip(&problem.prices)
            .map(|(q, s)| q * s)
            .sum();
        let total_release: f64 = releases.iter().sum();

        let res = residuals(problem, &releases);
        let summary = res.summary();
        let worst_residual = summary.worst();
        if !res.is_feasible(self.tolerance) {
            return Err(DispatchError::Solver(format!(
                "solver returned a trajectory violating constraints by {:.3e}",
                -worst_residual
            )));
        }

        info!(
            horizon,
            payoff, total_release, worst_residual, "release schedule solved"
        );
        debug!(
            budget_floor = summary.total_release_min,
            budget_cap = summary.total_release_max,
            level_floor = summary.level_min,
            level_ceiling = summary.level_max,
            release_floor = summary.release_min,
            release_cap = summary.release_max,
            "worst slack per constraint family"
        );

        Ok(DispatchSolution {
            releases,
            levels,
            payoff,
            total_release,
            residuals: summary,
            worst_residual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_problem(horizon: usize) -> ReleaseProblem {
        ReleaseProblem {
            inflows: vec![10.0; horizon],
            prices: vec![10.0; horizon],
            initial_level: 100.0,
            level_min: vec![50.0; horizon],
            level_max: vec![1000.0; horizon],
            release_min: vec![0.0; horizon],
            release_max: vec![50.0; horizon],
            total_release_min: 0.0,
            total_release_max: 150.0,
            initial_guess: None,
        }
    }

    #[test]
    fn test_single_period_positive_price_releases_max() {
        let mut problem = base_problem(1);
        problem.total_release_max = 1000.0;
        let solution = LpOptimizer::default().solve(&problem).unwrap();
        assert!((solution.releases[0] - 50.0).abs() < 1e-4);
        assert!((solution.payoff - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_single_period_negative_price_releases_min() {
        let mut problem = base_problem(1);
        problem.prices = vec![-10.0];
        problem.release_min = vec![2.0];
        let solution = LpOptimizer::default().solve(&problem).unwrap();
        assert!((solution.releases[0] - 2.0).abs() < 1e-4);
        assert!((solution.payoff + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_binding_level_floor_limits_release() {
        // One period, x0 = 100, inflow 10, floor 80: at most 30 can go out
        // even though the box bound allows 50.
        let mut problem = base_problem(1);
        problem.level_min = vec![80.0];
        problem.total_release_max = 1000.0;
        let solution = LpOptimizer::default().solve(&problem).unwrap();
        assert!((solution.releases[0] - 30.0).abs() < 1e-4);
        assert!((solution.levels[0] - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_level_ceiling_forces_release() {
        // x0 = 100, inflow 10, ceiling 90: at least 20 must be released.
        let mut problem = base_problem(1);
        problem.prices = vec![-1.0]; // revenue says release nothing
        problem.level_max = vec![90.0];
        problem.total_release_max = 1000.0;
        let solution = LpOptimizer::default().solve(&problem).unwrap();
        assert!((solution.releases[0] - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_statically_infeasible_budget_fails_before_solving() {
        let mut problem = base_problem(3);
        problem.total_release_min = 10.0;
        problem.total_release_max = 5.0;
        assert!(matches!(
            LpOptimizer::default().solve(&problem),
            Err(DispatchError::InfeasibleBounds(_))
        ));
    }

    #[test]
    fn test_solver_detects_empty_feasible_region() {
        // Bounds are individually consistent, but the budget floor (200)
        // cannot be met with releases capped at 50 per period over 3 periods.
        let mut problem = base_problem(3);
        problem.total_release_min = 200.0;
        problem.total_release_max = 300.0;
        let result = LpOptimizer::default().solve(&problem);
        assert!(matches!(
            result,
            Err(DispatchError::Infeasible(_)) | Err(DispatchError::Solver(_))
        ));
    }
}
