use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Complete description of one release-scheduling problem over a finite
/// horizon of T periods.
///
/// All per-period series must have length T. The reservoir level at the end of
/// period t is fully determined by the releases:
/// `X[t] = initial_level + sum(inflows[0..=t]) - sum(releases[0..=t])`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseProblem {
    /// Forecast water inflow per period (non-negative).
    pub inflows: Vec<f64>,
    /// Spot price per unit of released water, per period.
    pub prices: Vec<f64>,
    /// Reservoir level at the start of period 0.
    pub initial_level: f64,
    /// Lowest allowed end-of-period reservoir level, per period.
    pub level_min: Vec<f64>,
    /// Highest allowed end-of-period reservoir level, per period.
    pub level_max: Vec<f64>,
    /// Lowest allowed release per period (box bound on the decision variable).
    pub release_min: Vec<f64>,
    /// Highest allowed release per period.
    pub release_max: Vec<f64>,
    /// Floor on the total release summed over the whole horizon.
    pub total_release_min: f64,
    /// Cap on the total release summed over the whole horizon.
    pub total_release_max: f64,
    /// Optional starting trajectory for solvers that want one. The LP backend
    /// ignores it, but its shape is still validated.
    #[serde(default)]
    pub initial_guess: Option<Vec<f64>>,
}

impl ReleaseProblem {
    /// Number of planning periods T.
    pub fn horizon(&self) -> usize {
        self.inflows.len()
    }

    /// Static validation of the problem data, run before any solver call.
    ///
    /// Checks series shapes against the horizon, rejects non-finite numbers,
    /// negative inflows, and statically inverted bounds. Solver-level
    /// infeasibility (consistent bounds but an empty feasible region) is not
    /// detected here.
    pub fn validate(&self) -> Result<(), DispatchError> {
        let horizon = self.horizon();
        if horizon == 0 {
            return Err(DispatchError::EmptyHorizon);
        }

        let series: [(&'static str, &[f64]); 6] = [
            ("inflows", &self.inflows),
            ("prices", &self.prices),
            ("level_min", &self.level_min),
            ("level_max", &self.level_max),
            ("release_min", &self.release_min),
            ("release_max", &self.release_max),
        ];

        for (name, values) in series {
            if values.len() != horizon {
                return Err(DispatchError::ShapeMismatch {
                    name,
                    expected: horizon,
                    actual: values.len(),
                });
            }
            if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
                return Err(DispatchError::InvalidValue(format!(
                    "{}[{}] is not finite: {}",
                    name, idx, values[idx]
                )));
            }
        }

        if let Some(guess) = &self.initial_guess {
            if guess.len() != horizon {
                return Err(DispatchError::ShapeMismatch {
                    name: "initial_guess",
                    expected: horizon,
                    actual: guess.len(),
                });
            }
        }

        for (name, value) in [
            ("initial_level", self.initial_level),
            ("total_release_min", self.total_release_min),
            ("total_release_max", self.total_release_max),
        ] {
            if !value.is_finite() {
                return Err(DispatchError::InvalidValue(format!(
                    "{} is not finite: {}",
                    name, value
                )));
            }
        }

        if let Some(idx) = self.inflows.iter().position(|a| *a < 0.0) {
            return Err(DispatchError::InvalidValue(format!(
                "inflows[{}] is negative: {}",
                idx, self.inflows[idx]
            )));
        }

        if self.total_release_min > self.total_release_max {
            return Err(DispatchError::InfeasibleBounds(format!(
                "total_release_min {} exceeds total_release_max {}",
                self.total_release_min, self.total_release_max
            )));
        }

        for (t, (lo, hi)) in izip!(&self.release_min, &self.release_max).enumerate() {
            if lo > hi {
                return Err(DispatchError::InfeasibleBounds(format!(
                    "release_min[{}] = {} exceeds release_max[{}] = {}",
                    t, lo, t, hi
                )));
            }
        }

        for (t, (lo, hi)) in izip!(&self.level_min, &self.level_max).enumerate() {
            if lo > hi {
                return Err(DispatchError::InfeasibleBounds(format!(
                    "level_min[{}] = {} exceeds level_max[{}] = {}",
                    t, lo, t, hi
                )));
            }
        }

        Ok(())
    }
}
