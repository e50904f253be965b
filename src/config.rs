use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

use crate::domain::ReleaseProblem;
use crate::error::DispatchError;

/// A per-period input as written in a scenario file: either one constant
/// applied to every period, or an explicit array of length T.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SeriesSpec {
    Constant(f64),
    PerPeriod(Vec<f64>),
}

impl SeriesSpec {
    /// Expand to a full-length series. An explicit array is passed through
    /// unchanged; length errors are caught by `ReleaseProblem::validate`.
    fn materialize(&self, horizon: usize) -> Vec<f64> {
        match self {
            SeriesSpec::Constant(value) => vec![*value; horizon],
            SeriesSpec::PerPeriod(values) => values.clone(),
        }
    }
}

/// On-disk description of one solve: a TOML file, optionally overridden by
/// `HYDRO__`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub horizon: usize,
    pub inflows: SeriesSpec,
    pub prices: SeriesSpec,
    pub initial_level: f64,
    pub level_min: SeriesSpec,
    pub level_max: SeriesSpec,
    pub release_min: SeriesSpec,
    pub release_max: SeriesSpec,
    pub total_release_min: f64,
    pub total_release_max: f64,
    pub initial_guess: Option<SeriesSpec>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, DispatchError> {
        let figment = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("HYDRO__").split("__"));
        Ok(figment.extract()?)
    }

    /// Expand constants into full-length series and hand over to the domain
    /// layer. Only expansion happens here; validation stays with the problem.
    pub fn into_problem(self) -> ReleaseProblem {
        let horizon = self.horizon;
        ReleaseProblem {
            inflows: self.inflows.materialize(horizon),
            prices: self.prices.materialize(horizon),
            initial_level: self.initial_level,
            level_min: self.level_min.materialize(horizon),
            level_max: self.level_max.materialize(horizon),
            release_min: self.release_min.materialize(horizon),
            release_max: self.release_max.materialize(horizon),
            total_release_min: self.total_release_min,
            total_release_max: self.total_release_max,
            initial_guess: self.initial_guess.map(|g| g.materialize(horizon)),
        }
    }
}
