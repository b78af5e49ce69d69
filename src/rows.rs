//! A matrix stored as a vector of rows.
//!
//! [`RowMatrix`] is the lightweight representation for callers who build matrices row by
//! row, e.g. from literal tables in tests. Rows are directly mutable through
//! [`RowMatrix::row_mut`], but their lengths can never change, so the shape stays fixed.
//! It implements [`MatrixView`] and can be passed to the symmetrisation adapter like any
//! other matrix.

use crate::{
    error::{CMatrixError, ErrorRepr},
    matrix::{MatrixView, check_index},
};
use faer::c64;

/// An `nrows × ncols` complex matrix stored as `nrows` rows of `ncols` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMatrix {
    ncols: usize,
    rows: Vec<Vec<c64>>,
}

impl RowMatrix {
    /// Creates a zero-filled `nrows × ncols` matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            ncols,
            rows: vec![vec![c64::new(0.0, 0.0); ncols]; nrows],
        }
    }

    /// Builds a matrix from explicit rows.
    ///
    /// The column count is taken from the first row; an empty `rows` gives a `0 × 0`
    /// matrix.
    ///
    /// # Errors
    /// A dimension error if the rows do not all have the same length.
    pub fn from_rows(rows: Vec<Vec<c64>>) -> Result<Self, CMatrixError> {
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(ErrorRepr::RaggedRows {
                row,
                len: r.len(),
                expected: ncols,
            }
            .into());
        }
        Ok(Self { ncols, rows })
    }

    /// Returns row `i`, or `None` if out of range.
    pub fn row(&self, i: usize) -> Option<&[c64]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    /// Returns row `i` for in-place editing, or `None` if out of range.
    pub fn row_mut(&mut self, i: usize) -> Option<&mut [c64]> {
        self.rows.get_mut(i).map(Vec::as_mut_slice)
    }

    pub fn set(&mut self, row: usize, col: usize, value: c64) -> Result<(), CMatrixError> {
        check_index(self.dims(), row, col)?;
        self.rows[row][col] = value;
        Ok(())
    }

    pub fn into_rows(self) -> Vec<Vec<c64>> {
        self.rows
    }
}

impl MatrixView for RowMatrix {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.rows.len(), self.ncols)
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> Result<c64, CMatrixError> {
        check_index(self.dims(), row, col)?;
        Ok(self.rows[row][col])
    }
}
