//! Graph-form ADMM solver

mod linalg;
mod solver_error;
mod solver;

pub use linalg::*;
pub use solver_error::*;
pub use solver::*;
