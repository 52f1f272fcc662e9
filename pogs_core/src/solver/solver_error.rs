/// Solver errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverError
{
    /// Invalid matrix size or function list length.
    InvalidOp,
    /// Invalid parameter of a [`crate::FunctionObj`].
    InvalidFunc,
    /// Invalid [`crate::solver::SolverParam`].
    InvalidParam,
    /// Shortage of work slice length.
    WorkShortage,
    /// Cholesky factorization of the projection system failed.
    FactorFailure,
    /// Iterates are no longer finite.
    NotFinite,
}

impl core::fmt::Display for SolverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", match &self {
            SolverError::InvalidOp     => "InvalidOp: invalid matrix or function list size",
            SolverError::InvalidFunc   => "InvalidFunc: invalid FunctionObj parameter",
            SolverError::InvalidParam  => "InvalidParam: invalid SolverParam",
            SolverError::WorkShortage  => "WorkShortage: shortage of work slice length",
            SolverError::FactorFailure => "FactorFailure: failure of cholesky factorization",
            SolverError::NotFinite     => "NotFinite: iterates diverged",
        })
    }
}

//

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for SolverError {}
