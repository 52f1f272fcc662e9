use pogs_core::solver::SolverError;

/// Marshalling errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError
{
    /// The problem matrix has no dimensions.
    NotMatrix,
    /// A field has a type which is not expected.
    WrongType {
        /// Field name.
        field: String,
        /// Expected type.
        expected: &'static str,
    },
    /// A required field is missing.
    MissingField(String),
    /// A length of a field or an output slice is not the expected one.
    LengthMismatch {
        /// Field name.
        field: String,
        /// Actual length.
        len: usize,
        /// Expected length.
        expected: usize,
    },
    /// A function code is not one of [`pogs_core::Function`].
    BadFunctionCode(f64),
    /// Failure in the solver.
    Solver(SolverError),
}

impl core::fmt::Display for HostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self {
            HostError::NotMatrix => write!(f, "NotMatrix: A must be a matrix"),
            HostError::WrongType {field, expected} => write!(f, "WrongType: {} must be {}", field, expected),
            HostError::MissingField(field) => write!(f, "MissingField: {} is required", field),
            HostError::LengthMismatch {field, len, expected} => {
                write!(f, "LengthMismatch: length of {} is {}, expected {}", field, len, expected)
            },
            HostError::BadFunctionCode(code) => write!(f, "BadFunctionCode: {} is not a function code", code),
            HostError::Solver(e) => write!(f, "Solver: {}", e),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            HostError::Solver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SolverError> for HostError {
    fn from(e: SolverError) -> Self {
        HostError::Solver(e)
    }
}
