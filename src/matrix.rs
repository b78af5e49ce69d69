//! This module defines the read capability shared by every matrix representation.
//!
//! The symmetrisation adapter does not care how a matrix is stored; it only needs the
//! matrix's shape and a way to read one element at a time. [`MatrixView`] formalises that
//! contract. The crate's own [`CMatrix`](crate::CMatrix) and
//! [`RowMatrix`](crate::RowMatrix) implement it, and so do `faer`'s dense complex types,
//! so a caller already holding a `faer::Mat<c64>` can hand it to
//! [`hermitise`](crate::hermitise) or
//! [`eigensystem_hermitian`](crate::eigensystem_hermitian) directly.
//!
//! The capability is consumed only by the adapter. The solver itself always operates on
//! the concrete dense matrix the adapter produces.

use crate::error::{CMatrixError, ErrorRepr};
use faer::{Mat, MatMut, MatRef, c64, prelude::Reborrow};

/// Read-only access to a complex matrix: its dimensions and its elements.
///
/// # Example
///
/// A generic function that only reads a matrix.
///
/// ```
/// use cmatrix::{CMatrix, CMatrixError, MatrixView};
/// use faer::c64;
///
/// fn trace(m: &impl MatrixView) -> Result<c64, CMatrixError> {
///     let (n, _) = m.dims();
///     (0..n).map(|i| m.at(i, i)).sum()
/// }
///
/// let id = CMatrix::identity(3).unwrap();
/// assert_eq!(trace(&id).unwrap(), c64::new(3.0, 0.0));
/// ```
pub trait MatrixView {
    /// Returns `(nrows, ncols)`.
    fn dims(&self) -> (usize, usize);

    /// Returns the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Implementations must report an index error when either index is out of range.
    fn at(&self, row: usize, col: usize) -> Result<c64, CMatrixError>;
}

/// Shared bounds check for views that do not carry their own.
#[inline]
pub(crate) fn check_index(
    (nrows, ncols): (usize, usize),
    row: usize,
    col: usize,
) -> Result<(), CMatrixError> {
    if row < nrows && col < ncols {
        Ok(())
    } else {
        Err(ErrorRepr::IndexOutOfBounds {
            row,
            col,
            nrows,
            ncols,
        }
        .into())
    }
}

/// Implementation of `MatrixView` for `faer`'s immutable dense matrix view (`MatRef`).
impl MatrixView for MatRef<'_, c64> {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> Result<c64, CMatrixError> {
        check_index(MatrixView::dims(self), row, col)?;
        Ok(self[(row, col)])
    }
}

/// Implementation of `MatrixView` for `faer`'s mutable dense matrix view (`MatMut`).
/// This implementation delegates to the `MatRef` implementation via a reborrow.
impl MatrixView for MatMut<'_, c64> {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        MatrixView::dims(&self.rb())
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> Result<c64, CMatrixError> {
        MatrixView::at(&self.rb(), row, col)
    }
}

/// Implementation of `MatrixView` for `faer`'s owned dense matrix (`Mat`).
impl MatrixView for Mat<c64> {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        MatrixView::dims(&self.as_ref())
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> Result<c64, CMatrixError> {
        MatrixView::at(&self.as_ref(), row, col)
    }
}
