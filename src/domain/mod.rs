pub mod problem;
pub mod solution;

pub use problem::*;
pub use solution::*;
