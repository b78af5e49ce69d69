//! The owned dense complex matrix.
//!
//! [`CMatrix`] is the concrete representation handed to the eigensolver. Its elements live
//! in a single contiguous, column-major `Vec<c64>`, which lets the matrix be lent to
//! [`faer`] as a [`MatRef`]/[`MatMut`] without copying. The public accessors present the
//! usual `(row, col)` semantics, so the storage order is only visible through
//! [`CMatrix::column`].
//!
//! Storage is acquired with a fallible reservation: an allocation failure surfaces as an
//! allocation error rather than aborting the process.

use crate::{
    error::{CMatrixError, ErrorRepr},
    matrix::MatrixView,
};
use faer::{MatMut, MatRef, c64};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

const ZERO: c64 = c64::new(0.0, 0.0);

/// Reserves exactly `len` zeroed scalars, reporting failure instead of aborting.
pub(crate) fn try_alloc_zeroed(len: usize, resource: &'static str) -> Result<Vec<c64>, CMatrixError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| ErrorRepr::Allocation {
        resource,
        elements: len,
    })?;
    data.resize(len, ZERO);
    Ok(data)
}

/// A dense `nrows × ncols` matrix of double-precision complex numbers.
///
/// The shape is fixed at construction; every element is always defined, and a freshly
/// constructed matrix is zero everywhere.
///
/// # Example
///
/// ```
/// use cmatrix::CMatrix;
/// use faer::c64;
///
/// let mut m = CMatrix::zeros(2, 3).unwrap();
/// m.set(1, 2, c64::new(1.0, -2.0)).unwrap();
/// assert_eq!(m.at(1, 2).unwrap(), c64::new(1.0, -2.0));
/// assert_eq!(m.dims(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CMatrix {
    nrows: usize,
    ncols: usize,
    data: Vec<c64>,
}

impl CMatrix {
    /// Creates an `nrows × ncols` matrix with every element set to `0 + 0i`.
    ///
    /// # Errors
    /// A dimension error if `nrows * ncols` overflows `usize`, or an allocation error if
    /// the storage cannot be acquired.
    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self, CMatrixError> {
        let len = nrows
            .checked_mul(ncols)
            .ok_or(ErrorRepr::ExtentOverflow {
                rows: nrows,
                cols: ncols,
            })?;
        Ok(Self {
            nrows,
            ncols,
            data: try_alloc_zeroed(len, "matrix")?,
        })
    }

    /// Creates a matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn(
        nrows: usize,
        ncols: usize,
        mut f: impl FnMut(usize, usize) -> c64,
    ) -> Result<Self, CMatrixError> {
        let mut m = Self::zeros(nrows, ncols)?;
        for j in 0..ncols {
            for i in 0..nrows {
                m.data[i + j * nrows] = f(i, j);
            }
        }
        Ok(m)
    }

    /// Creates the `n × n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, CMatrixError> {
        Self::from_fn(n, n, |i, j| if i == j { c64::new(1.0, 0.0) } else { ZERO })
    }

    /// Copies any readable matrix into a new dense matrix.
    pub fn from_view<V: MatrixView + ?Sized>(view: &V) -> Result<Self, CMatrixError> {
        let (nrows, ncols) = view.dims();
        let mut m = Self::zeros(nrows, ncols)?;
        for j in 0..ncols {
            for i in 0..nrows {
                m.data[i + j * nrows] = view.at(i, j)?;
            }
        }
        Ok(m)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns `(nrows, ncols)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Result<usize, CMatrixError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(ErrorRepr::IndexOutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            }
            .into());
        }
        Ok(row + col * self.nrows)
    }

    /// Returns the element at `(row, col)`.
    ///
    /// # Errors
    /// An index error if either index is out of range.
    pub fn at(&self, row: usize, col: usize) -> Result<c64, CMatrixError> {
        Ok(self.data[self.offset(row, col)?])
    }

    /// Stores `value` at `(row, col)`.
    ///
    /// # Errors
    /// An index error if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: c64) -> Result<(), CMatrixError> {
        let k = self.offset(row, col)?;
        self.data[k] = value;
        Ok(())
    }

    /// Returns column `col` as a contiguous slice.
    ///
    /// # Errors
    /// An index error if `col` is out of range.
    pub fn column(&self, col: usize) -> Result<&[c64], CMatrixError> {
        if col >= self.ncols {
            return Err(ErrorRepr::IndexOutOfBounds {
                row: 0,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            }
            .into());
        }
        Ok(&self.data[col * self.nrows..(col + 1) * self.nrows])
    }

    fn check_same_shape(&self, other: &Self) -> Result<(), CMatrixError> {
        if self.dims() != other.dims() {
            return Err(ErrorRepr::ShapeMismatch {
                expected_rows: other.nrows,
                expected_cols: other.ncols,
                rows: self.nrows,
                cols: self.ncols,
            }
            .into());
        }
        Ok(())
    }

    /// Computes `dst ← dst + self`.
    ///
    /// # Errors
    /// A dimension error if the shapes differ; `dst` is left untouched in that case.
    pub fn add_into(&self, dst: &mut CMatrix) -> Result<(), CMatrixError> {
        self.check_same_shape(dst)?;
        for (d, &s) in dst.data.iter_mut().zip(&self.data) {
            *d += s;
        }
        Ok(())
    }

    /// Computes `dst ← dst + alpha · self`.
    ///
    /// # Errors
    /// A dimension error if the shapes differ; `dst` is left untouched in that case.
    pub fn add_scaled_into(&self, dst: &mut CMatrix, alpha: c64) -> Result<(), CMatrixError> {
        self.check_same_shape(dst)?;
        for (d, &s) in dst.data.iter_mut().zip(&self.data) {
            *d += alpha * s;
        }
        Ok(())
    }

    /// Computes `self ← alpha · self` in place.
    pub fn scale(&mut self, alpha: c64) {
        for x in &mut self.data {
            *x *= alpha;
        }
    }

    /// Renders the matrix as text: one line per row, elements separated by a single
    /// space, each element written as `re±imi` with six fractional digits.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                if j > 0 {
                    out.push(' ');
                }
                let z = self.data[i + j * self.nrows];
                out.push_str(&format!("{:.6}{:+.6}i", z.re, z.im));
            }
            out.push('\n');
        }
        out
    }

    /// Borrows the matrix as a [`faer`] view without copying.
    #[inline]
    pub fn as_faer(&self) -> MatRef<'_, c64> {
        MatRef::from_column_major_slice(&self.data, self.nrows, self.ncols)
    }

    /// Borrows the matrix as a mutable [`faer`] view without copying.
    #[inline]
    pub fn as_faer_mut(&mut self) -> MatMut<'_, c64> {
        MatMut::from_column_major_slice_mut(&mut self.data, self.nrows, self.ncols)
    }

    /// Resets every element to zero.
    pub(crate) fn fill_zero(&mut self) {
        self.data.fill(ZERO);
    }
}

impl fmt::Display for CMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl MatrixView for CMatrix {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> Result<c64, CMatrixError> {
        CMatrix::at(self, row, col)
    }
}

/// Panicking element access, mirroring `faer`'s indexing.
impl Index<(usize, usize)> for CMatrix {
    type Output = c64;

    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &c64 {
        assert!(
            row < self.nrows && col < self.ncols,
            "Index ({row}, {col}) out of bounds for a {}x{} matrix.",
            self.nrows,
            self.ncols,
        );
        &self.data[row + col * self.nrows]
    }
}

impl IndexMut<(usize, usize)> for CMatrix {
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut c64 {
        assert!(
            row < self.nrows && col < self.ncols,
            "Index ({row}, {col}) out of bounds for a {}x{} matrix.",
            self.nrows,
            self.ncols,
        );
        &mut self.data[row + col * self.nrows]
    }
}
