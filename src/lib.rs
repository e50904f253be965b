//! Revenue-optimal release scheduling for a single hydro reservoir.
//!
//! One solve takes per-period inflows, spot prices, reservoir level bounds,
//! release bounds, and an aggregate release budget, and returns the release
//! trajectory maximizing total revenue. The problem is linear, so it is
//! formulated and solved as an LP.

pub mod config;
pub mod domain;
pub mod error;
pub mod optimizer;
pub mod report;
pub mod telemetry;

pub use domain::{DispatchSolution, ReleaseProblem, ResidualSummary};
pub use error::DispatchError;
pub use optimizer::{DispatchStrategy, LpOptimizer};
pub use report::SolveReport;
