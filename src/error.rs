use thiserror::Error;

/// Errors raised when adopting or copying foreign storage into a [`FixedVec`].
///
/// Arithmetic itself never fails at runtime: element and length mismatches
/// are rejected at compile time.
///
/// [`FixedVec`]: crate::FixedVec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimvecError {
    #[error("length mismatch: expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, SimvecError>;
