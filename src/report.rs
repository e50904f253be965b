//! Presentation boundary. Numbers stay full precision everywhere else in the
//! crate; rounding happens only while formatting here.

use serde::Serialize;
use std::fmt::Write;

use crate::domain::{DispatchSolution, ResidualSummary};
use crate::error::DispatchError;

/// Flat, serializable view of a solve outcome: the success/message shape
/// callers outside Rust expect, flattened from `Result<DispatchSolution, _>`.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_release: Option<f64>,
    /// Worst slack per constraint family; present on successful solves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residuals: Option<ResidualSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_residual: Option<f64>,
    pub releases: Vec<f64>,
    pub levels: Vec<f64>,
}

impl SolveReport {
    pub fn from_result(result: &Result<DispatchSolution, DispatchError>) -> Self {
        match result {
            Ok(solution) => Self {
                success: true,
                message: "optimal".to_string(),
                payoff: Some(solution.payoff),
                total_release: Some(solution.total_release),
                residuals: Some(solution.residuals.clone()),
                worst_residual: Some(solution.worst_residual),
                releases: solution.releases.clone(),
                levels: solution.levels.clone(),
            },
            Err(err) => Self {
                success: false,
                message: err.to_string(),
                payoff: None,
                total_release: None,
                residuals: None,
                worst_residual: None,
                releases: Vec::new(),
                levels: Vec::new(),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable rendering, values rounded to 3 decimals for display.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.success {
            let _ = writeln!(out, "solve failed: {}", self.message);
            return out;
        }

        let _ = writeln!(out, "status: {}", self.message);
        if let Some(payoff) = self.payoff {
            let _ = writeln!(out, "payoff: {:.3}", payoff);
        }
        if let Some(total) = self.total_release {
            let _ = writeln!(out, "total release: {:.3}", total);
        }
        if let Some(res) = &self.residuals {
            let _ = writeln!(
                out,
                "worst slack: budget [{:.3e}, {:.3e}], level [{:.3e}, {:.3e}], release [{:.3e}, {:.3e}]",
                res.total_release_min,
                res.total_release_max,
                res.level_min,
                res.level_max,
                res.release_min,
                res.release_max,
            );
        }
        let _ = writeln!(out, "{:>6} {:>12} {:>12}", "period", "release", "level");
        for (t, (release, level)) in self.releases.iter().zip(&self.levels).enumerate() {
            let _ = writeln!(out, "{:>6} {:>12.3} {:>12.3}", t, release, level);
        }
        out
    }
}
