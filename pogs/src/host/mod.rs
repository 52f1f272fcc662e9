//! Marshalling layer between a host statistical environment and the solver
//! 
//! The host passes a matrix \\(A\\) (column-major, with dimensions),
//! two lists describing \\(f\\) and \\(g\\) with fields `h`, `a`, `b`, `c`, `d`, `e`,
//! and an optional list of settings.
//! [`pogs_wrapper`] converts them, runs the solver and returns a named list
//! with `x`, `y` and `optval`.

mod value;
mod host_error;
mod marshal;

pub use value::*;
pub use host_error::*;
pub use marshal::*;
