use thiserror::Error;

/// Errors produced while building or solving a release-scheduling problem.
///
/// The first three variants are usage/configuration errors detected before the
/// solver runs; the last two come out of the numerical solve itself.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("planning horizon is empty")]
    EmptyHorizon,

    #[error("series `{name}` has length {actual}, expected horizon length {expected}")]
    ShapeMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("infeasible bounds: {0}")]
    InfeasibleBounds(String),

    #[error("problem is infeasible: {0}")]
    Infeasible(String),

    #[error("solver failed: {0}")]
    Solver(String),

    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}
