use serde::Serialize;

/// Worst slack per constraint family for a candidate trajectory. Every value
/// is non-negative (up to solver tolerance) when the trajectory is feasible.
#[derive(Debug, Clone, Serialize)]
pub struct ResidualSummary {
    /// `sum(q) - total_release_min`
    pub total_release_min: f64,
    /// `total_release_max - sum(q)`
    pub total_release_max: f64,
    /// worst of `X[t] - level_min[t]`
    pub level_min: f64,
    /// worst of `level_max[t] - X[t]`
    pub level_max: f64,
    /// worst of `q[t] - release_min[t]`
    pub release_min: f64,
    /// worst of `release_max[t] - q[t]`
    pub release_max: f64,
}

impl ResidualSummary {
    /// Most negative slack across all families.
    pub fn worst(&self) -> f64 {
        [
            self.total_release_min,
            self.total_release_max,
            self.level_min,
            self.level_max,
            self.release_min,
            self.release_max,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}

/// Result of a successful solve. Produced only when the solver reports an
/// optimum; infeasible or failed solves surface as errors instead, so a
/// `DispatchSolution` never carries an untrustworthy trajectory.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchSolution {
    /// Optimal release per period, full precision.
    pub releases: Vec<f64>,
    /// End-of-period reservoir levels implied by `releases`.
    pub levels: Vec<f64>,
    /// Total revenue `sum(releases[t] * prices[t])`.
    pub payoff: f64,
    /// `sum(releases)`, for checking against the aggregate budget.
    pub total_release: f64,
    /// Worst slack per constraint family of the returned trajectory.
    pub residuals: ResidualSummary,
    /// Worst slack overall, `residuals.worst()`.
    pub worst_residual: f64,
}

impl DispatchSolution {
    pub fn horizon(&self) -> usize {
        self.releases.len()
    }
}
