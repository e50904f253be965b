//! Feasibility arithmetic shared by the solver and the tests.
//!
//! Every constraint of the formulation is expressed here as an explicit
//! "slack ≥ 0" residual of a candidate trajectory, so feasibility can be
//! checked independently of whatever the solver claims.

use crate::domain::{ReleaseProblem, ResidualSummary};

/// End-of-period reservoir levels implied by a release trajectory.
///
/// `X[t] = initial_level + sum(inflows[0..=t]) - sum(releases[0..=t])`,
/// computed with a single running sum rather than re-summing per period.
pub fn level_trajectory(problem: &ReleaseProblem, releases: &[f64]) -> Vec<f64> {
    let mut level = problem.initial_level;
    problem
        .inflows
        .iter()
        .zip(releases)
        .map(|(inflow, release)| {
            level += inflow - release;
            level
        })
        .collect()
}

/// Slack of every constraint family for one candidate trajectory.
///
/// Each value is non-negative iff the corresponding constraint holds. The
/// release box bounds are enforced as variable bounds in the solver model, but
/// they are evaluated here too so diagnostics cover the full feasible set.
#[derive(Debug, Clone)]
pub struct ConstraintResiduals {
    /// `sum(q) - total_release_min`
    pub total_release_min: f64,
    /// `total_release_max - sum(q)`
    pub total_release_max: f64,
    /// `X[t] - level_min[t]` per period
    pub level_min: Vec<f64>,
    /// `level_max[t] - X[t]` per period
    pub level_max: Vec<f64>,
    /// `q[t] - release_min[t]` per period
    pub release_min: Vec<f64>,
    /// `release_max[t] - q[t]` per period
    pub release_max: Vec<f64>,
}

impl ConstraintResiduals {
    /// Collapse each family to its worst slack, for diagnostics and reports.
    pub fn summary(&self) -> ResidualSummary {
        fn family_worst(values: &[f64]) -> f64 {
            values.iter().copied().fold(f64::INFINITY, f64::min)
        }
        ResidualSummary {
            total_release_min: self.total_release_min,
            total_release_max: self.total_release_max,
            level_min: family_worst(&self.level_min),
            level_max: family_worst(&self.level_max),
            release_min: family_worst(&self.release_min),
            release_max: family_worst(&self.release_max),
        }
    }

    /// Most negative slack across all constraints; non-negative (up to
    /// tolerance) for a feasible trajectory.
    pub fn worst(&self) -> f64 {
        self.summary().worst()
    }

    pub fn is_feasible(&self, tolerance: f64) -> bool {
        self.worst() >= -tolerance
    }
}

/// Evaluate all constraint residuals for `releases` against `problem`.
///
/// O(T): the reservoir path constraints reuse one prefix-sum pass.
pub fn residuals(problem: &ReleaseProblem, releases: &[f64]) -> ConstraintResiduals {
    let total: f64 = releases.iter().sum();
    let levels = level_trajectory(problem, releases);

    ConstraintResiduals {
        total_release_min: total - problem.total_release_min,
        total_release_max: problem.total_release_max - total,
        level_min: levels
            .iter()
            .zip(&problem.level_min)
            .map(|(x, lo)| x - lo)
            .collect(),
        level_max: levels
            .iter()
            .zip(&problem.level_max)
            .map(|(x, hi)| hi - x)
            .collect(),
        release_min: releases
            .iter()
            .zip(&problem.release_min)
            .map(|(q, lo)| q - lo)
            .collect(),
        release_max: releases
            .iter()
            .zip(&problem.release_max)
            .map(|(q, hi)| hi - q)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReleaseProblem;

    fn small_problem() -> ReleaseProblem {
        ReleaseProblem {
            inflows: vec![10.0, 10.0, 10.0],
            prices: vec![1.0, 2.0, 3.0],
            initial_level: 100.0,
            level_min: vec![50.0; 3],
            level_max: vec![200.0; 3],
            release_min: vec![0.0; 3],
            release_max: vec![20.0; 3],
            total_release_min: 0.0,
            total_release_max: 40.0,
            initial_guess: None,
        }
    }

    #[test]
    fn test_level_trajectory_running_sum() {
        let problem = small_problem();
        let levels = level_trajectory(&problem, &[5.0, 15.0, 0.0]);
        // 100 + 10 - 5, then + 10 - 15, then + 10 - 0
        assert_eq!(levels, vec![105.0, 100.0, 110.0]);
    }

    #[test]
    fn test_residuals_feasible_trajectory() {
        let problem = small_problem();
        let res = residuals(&problem, &[5.0, 15.0, 0.0]);
        assert!(res.is_feasible(1e-9));
        assert_eq!(res.total_release_min, 20.0);
        assert_eq!(res.total_release_max, 20.0);
        assert_eq!(res.release_max, vec![15.0, 5.0, 20.0]);
    }

    #[test]
    fn test_residuals_flag_budget_violation() {
        let problem = small_problem();
        let res = residuals(&problem, &[20.0, 20.0, 20.0]);
        assert!(!res.is_feasible(1e-9));
        // sum(q) = 60 exceeds the 40 cap
        assert_eq!(res.total_release_max, -20.0);
        assert_eq!(res.worst(), -20.0);
    }

    #[test]
    fn test_summary_collapses_each_family() {
        let problem = small_problem();
        let summary = residuals(&problem, &[5.0, 15.0, 0.0]).summary();
        assert_eq!(summary.total_release_min, 20.0);
        assert_eq!(summary.total_release_max, 20.0);
        // Tightest level floor slack: level 100 at t=1 against floor 50.
        assert_eq!(summary.level_min, 50.0);
        // Tightest release cap slack: 20 - 15 at t=1.
        assert_eq!(summary.release_max, 5.0);
        // The zero release in period 2 sits on its floor.
        assert_eq!(summary.release_min, 0.0);
        assert_eq!(summary.worst(), 0.0);
    }

    #[test]
    fn test_residuals_flag_level_violation() {
        let mut problem = small_problem();
        problem.level_min = vec![105.0; 3];
        // Level after period 1 is 100, below the 105 floor.
        let res = residuals(&problem, &[5.0, 15.0, 0.0]);
        assert!(!res.is_feasible(1e-9));
        assert_eq!(res.level_min[1], -5.0);
    }
}
