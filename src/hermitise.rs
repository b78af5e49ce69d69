//! Symmetrisation adapter.
//!
//! Matrices representing Hermitian operators are often filled only in their lower
//! triangle. Before anything reaches the eigensolver, the adapter rebuilds the full
//! Hermitian matrix from the lower triangle and diagonal of the input, reflecting
//! conjugates into the upper triangle. Whatever the input holds above the diagonal is
//! ignored.
//!
//! Diagonal entries are copied verbatim, imaginary parts included. The solver only reads
//! the real part of the diagonal.

use crate::{
    cmatrix::CMatrix,
    error::{CMatrixError, ErrorRepr},
    matrix::MatrixView,
};

/// Returns the order `n` of a square view.
pub(crate) fn square_order<V: MatrixView + ?Sized>(m: &V) -> Result<usize, CMatrixError> {
    let (rows, cols) = m.dims();
    if rows != cols {
        return Err(ErrorRepr::NotSquare { rows, cols }.into());
    }
    Ok(rows)
}

/// Builds a fresh Hermitian matrix `H` from the lower triangle of `m`.
///
/// For `i >= j`, `H[i, j] = m[i, j]`; for `i < j`, `H[i, j] = conj(m[j, i])`.
///
/// # Errors
/// A dimension error if `m` is not square; any error raised by `m` while reading.
///
/// # Example
///
/// ```
/// use cmatrix::{RowMatrix, hermitise};
/// use faer::c64;
///
/// // The upper-right entry is garbage and is ignored.
/// let m = RowMatrix::from_rows(vec![
///     vec![c64::new(1.0, 0.0), c64::new(42.0, 42.0)],
///     vec![c64::new(2.0, 3.0), c64::new(-1.0, 0.0)],
/// ])
/// .unwrap();
/// let h = hermitise(&m).unwrap();
/// assert_eq!(h.at(0, 1).unwrap(), c64::new(2.0, -3.0));
/// ```
pub fn hermitise<V: MatrixView + ?Sized>(m: &V) -> Result<CMatrix, CMatrixError> {
    let n = square_order(m)?;
    let mut h = CMatrix::zeros(n, n)?;
    fill_hermitian(m, &mut h, n)?;
    Ok(h)
}

/// Writes the Hermitian matrix built from the lower triangle of `m` into `dst`.
///
/// This is the allocation-free form of [`hermitise`] for repeated solves at a fixed order.
///
/// # Errors
/// A dimension error if `m` is not square or `dst` does not have the same shape as `m`.
pub fn hermitise_into<V: MatrixView + ?Sized>(
    m: &V,
    dst: &mut CMatrix,
) -> Result<(), CMatrixError> {
    let n = square_order(m)?;
    if dst.dims() != (n, n) {
        return Err(ErrorRepr::ShapeMismatch {
            expected_rows: n,
            expected_cols: n,
            rows: dst.nrows(),
            cols: dst.ncols(),
        }
        .into());
    }
    fill_hermitian(m, dst, n)
}

fn fill_hermitian<V: MatrixView + ?Sized>(
    m: &V,
    h: &mut CMatrix,
    n: usize,
) -> Result<(), CMatrixError> {
    for j in 0..n {
        for i in j..n {
            let z = m.at(i, j)?;
            h[(i, j)] = z;
            if i != j {
                h[(j, i)] = z.conj();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, rows::RowMatrix};
    use faer::c64;

    fn lower_only(n: usize) -> CMatrix {
        CMatrix::from_fn(n, n, |i, j| {
            if i > j {
                c64::new((i + 2 * j) as f64, (i as f64) - 0.5 * j as f64)
            } else if i == j {
                c64::new(i as f64, 0.0)
            } else {
                c64::new(f64::NAN, 7.0)
            }
        })
        .unwrap()
    }

    #[test]
    fn test_lower_triangle_is_kept_and_reflected() {
        let m = lower_only(4);
        let h = hermitise(&m).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                if i >= j {
                    assert_eq!(h[(i, j)], m[(i, j)]);
                } else {
                    assert_eq!(h[(i, j)], m[(j, i)].conj());
                }
            }
        }
    }

    #[test]
    fn test_output_is_hermitian() {
        let h = hermitise(&lower_only(5)).unwrap();
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(h[(i, j)], h[(j, i)].conj());
            }
        }
    }

    #[test]
    fn test_hermitise_is_idempotent() {
        let once = hermitise(&lower_only(4)).unwrap();
        let twice = hermitise(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_diagonal_imaginary_parts_are_preserved() {
        let m = RowMatrix::from_rows(vec![
            vec![c64::new(1.0, 0.25), c64::new(0.0, 0.0)],
            vec![c64::new(0.0, 1.0), c64::new(2.0, -0.5)],
        ])
        .unwrap();
        let h = hermitise(&m).unwrap();
        assert_eq!(h[(0, 0)], c64::new(1.0, 0.25));
        assert_eq!(h[(1, 1)], c64::new(2.0, -0.5));
        assert_eq!(h[(0, 1)], c64::new(0.0, -1.0));
    }

    #[test]
    fn test_non_square_input_is_rejected() {
        let m = CMatrix::zeros(2, 3).unwrap();
        assert_eq!(hermitise(&m).unwrap_err().kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_hermitise_into_matches_hermitise() {
        let m = lower_only(3);
        let mut dst = CMatrix::zeros(3, 3).unwrap();
        hermitise_into(&m, &mut dst).unwrap();
        assert_eq!(dst, hermitise(&m).unwrap());

        let mut wrong = CMatrix::zeros(2, 2).unwrap();
        let err = hermitise_into(&m, &mut wrong).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_empty_matrix_hermitises_to_empty() {
        let h = hermitise(&CMatrix::zeros(0, 0).unwrap()).unwrap();
        assert_eq!(h.dims(), (0, 0));
    }
}
