//! This module defines the error type shared by every fallible operation in the crate.
//!
//! All failure conditions are centralised in a single crate-private enum, [`ErrorRepr`],
//! wrapped by the public [`CMatrixError`]. Callers that need to branch on the kind of
//! failure use [`CMatrixError::kind`], which maps each detailed condition onto one of the
//! five coarse [`ErrorKind`] classes.
//!
//! Using the [`thiserror`] crate allows us to create idiomatic error types with minimal
//! boilerplate. Note that [`faer::linalg::evd::EvdError`] does not implement the standard
//! [`std::error::Error`] trait, so we wrap it manually to provide a compatible error type.
use thiserror::Error;

/// Represents all possible errors raised by matrix construction, element access,
/// arithmetic, symmetrisation, and the Hermitian eigensolver.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct CMatrixError(#[from] ErrorRepr);

/// Coarse classification of a [`CMatrixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Non-square input, mismatched shapes, or an extent that cannot be represented.
    Dimension,
    /// Element access outside the matrix.
    Index,
    /// Use of a resource after it has been released.
    State,
    /// Memory for a matrix or solver buffer could not be acquired.
    Allocation,
    /// The eigensolver failed to converge or produced non-finite values.
    Solver,
}

/// Private enum containing the distinct kinds of errors.
#[derive(Error, Debug, PartialEq)]
pub(crate) enum ErrorRepr {
    #[error("Dimension error: expected a square matrix, got {rows}x{cols}.")]
    NotSquare { rows: usize, cols: usize },

    #[error(
        "Dimension error: shape mismatch, expected {expected_rows}x{expected_cols} but got {rows}x{cols}."
    )]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Dimension error: the eigensolver requires a matrix of order at least 1.")]
    EmptyMatrix,

    /// A buffer on the reusable path was sized for a different order than the workspace.
    #[error("Dimension error: {resource} has order {actual}, but the workspace has order {expected}.")]
    OrderMismatch {
        resource: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Dimension error: a {rows}x{cols} matrix does not fit in addressable memory.")]
    ExtentOverflow { rows: usize, cols: usize },

    #[error("Dimension error: row {row} has {len} entries, expected {expected}.")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Index error: ({row}, {col}) is out of bounds for a {nrows}x{ncols} matrix.")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    #[error("State error: the {resource} has already been released.")]
    Released { resource: &'static str },

    #[error("Allocation error: failed to acquire {elements} elements for the {resource}.")]
    Allocation {
        resource: &'static str,
        elements: usize,
    },

    #[error("Allocation error: failed to acquire the eigensolver workspace for order {order}.")]
    WorkspaceAllocation { order: usize },

    #[error("Solver error: the eigendecomposition produced non-finite values.")]
    NonFinite,

    /// Wraps an error originating from [`faer`]'s eigendecomposition module.
    #[error("Solver error: the Hermitian eigendecomposition failed: {0:?}")]
    Evd(faer::linalg::evd::EvdError),
}

impl CMatrixError {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self.0 {
            ErrorRepr::NotSquare { .. }
            | ErrorRepr::ShapeMismatch { .. }
            | ErrorRepr::EmptyMatrix
            | ErrorRepr::OrderMismatch { .. }
            | ErrorRepr::ExtentOverflow { .. }
            | ErrorRepr::RaggedRows { .. } => ErrorKind::Dimension,
            ErrorRepr::IndexOutOfBounds { .. } => ErrorKind::Index,
            ErrorRepr::Released { .. } => ErrorKind::State,
            ErrorRepr::Allocation { .. } | ErrorRepr::WorkspaceAllocation { .. } => {
                ErrorKind::Allocation
            }
            ErrorRepr::NonFinite | ErrorRepr::Evd(_) => ErrorKind::Solver,
        }
    }
}

// Manually implement PartialEq for the public error type.
// We compare the inner `ErrorRepr`.
impl PartialEq for CMatrixError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let error = CMatrixError::from(ErrorRepr::ShapeMismatch {
            expected_rows: 3,
            expected_cols: 2,
            rows: 2,
            cols: 3,
        });
        assert_eq!(
            error.to_string(),
            "Dimension error: shape mismatch, expected 3x2 but got 2x3."
        );
        assert_eq!(error.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_index_error_message() {
        let error = CMatrixError::from(ErrorRepr::IndexOutOfBounds {
            row: 4,
            col: 0,
            nrows: 2,
            ncols: 2,
        });
        assert_eq!(
            error.to_string(),
            "Index error: (4, 0) is out of bounds for a 2x2 matrix."
        );
        assert_eq!(error.kind(), ErrorKind::Index);
    }

    #[test]
    fn test_released_error_message() {
        let error = CMatrixError::from(ErrorRepr::Released {
            resource: "eigensolver workspace",
        });
        assert_eq!(
            error.to_string(),
            "State error: the eigensolver workspace has already been released."
        );
        assert_eq!(error.kind(), ErrorKind::State);
    }

    #[test]
    fn test_evd_error_message() {
        let evd_error = faer::linalg::evd::EvdError::NoConvergence;
        let error = CMatrixError::from(ErrorRepr::Evd(evd_error));
        let expected_message =
            "Solver error: the Hermitian eigendecomposition failed: NoConvergence";
        assert_eq!(error.to_string(), expected_message);
        assert_eq!(error.kind(), ErrorKind::Solver);
    }

    #[test]
    fn test_kind_classification() {
        let cases = [
            (ErrorRepr::NotSquare { rows: 2, cols: 3 }, ErrorKind::Dimension),
            (ErrorRepr::EmptyMatrix, ErrorKind::Dimension),
            (
                ErrorRepr::Allocation {
                    resource: "matrix",
                    elements: 16,
                },
                ErrorKind::Allocation,
            ),
            (ErrorRepr::WorkspaceAllocation { order: 8 }, ErrorKind::Allocation),
            (ErrorRepr::NonFinite, ErrorKind::Solver),
        ];
        for (repr, kind) in cases {
            assert_eq!(CMatrixError::from(repr).kind(), kind);
        }
    }
}
