pub mod constraints;
pub mod lp;
pub mod types;

pub use constraints::*;
pub use lp::*;
pub use types::*;
