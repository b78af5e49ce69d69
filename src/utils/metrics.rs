//! Accuracy measurements for computed eigensystems.
//!
//! These are the quantities the correctness tests and the `accuracy` runner assert on.
//! All of them are insensitive to the arbitrary phase of each eigenvector.

use crate::{
    cmatrix::CMatrix,
    error::{CMatrixError, ErrorRepr},
    solvers::HermitianEigensystem,
};
use faer::{Mat, MatRef, c64};

/// Returns `|⟨a, b⟩| = |Σ conj(a_i) b_i|`.
///
/// For unit vectors this is `1` exactly when `a` and `b` agree up to a phase.
pub fn overlap(a: &[c64], b: &[c64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.conj() * y)
        .sum::<c64>()
        .norm()
}

/// Returns the Euclidean norm of `v`.
pub fn norm_l2(v: &[c64]) -> f64 {
    v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}

/// Returns `true` if `values` is sorted in non-decreasing order.
pub fn is_ascending(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

fn check_shape(h: &CMatrix, sys: &HermitianEigensystem) -> Result<usize, CMatrixError> {
    let n = sys.len();
    let bad = sys.eigenvectors.iter().find(|v| v.len() != n);
    if h.dims() != (n, n) || sys.eigenvectors.len() != n || bad.is_some() {
        return Err(ErrorRepr::ShapeMismatch {
            expected_rows: n,
            expected_cols: n,
            rows: h.nrows(),
            cols: bad.map_or(h.ncols(), Vec::len),
        }
        .into());
    }
    Ok(n)
}

/// Returns `max_k ‖H v_k − λ_k v_k‖∞` over all eigenpairs of `sys`.
///
/// # Errors
/// A dimension error if `h` and `sys` do not describe the same order.
pub fn max_residual(h: &CMatrix, sys: &HermitianEigensystem) -> Result<f64, CMatrixError> {
    let n = check_shape(h, sys)?;
    let mut worst = 0.0_f64;
    for (&lambda, v) in sys.eigenvalues.iter().zip(&sys.eigenvectors) {
        let hv = h.as_faer() * MatRef::from_column_major_slice(v.as_slice(), n, 1);
        for (i, &vi) in v.iter().enumerate() {
            worst = worst.max((hv[(i, 0)] - vi * lambda).norm());
        }
    }
    Ok(worst)
}

/// Returns the loss of orthogonality `‖I − VᴴV‖_F`, where the columns of `V` are the
/// given eigenvectors.
pub fn orthogonality_loss(eigenvectors: &[Vec<c64>]) -> Result<f64, CMatrixError> {
    let n = eigenvectors.len();
    if let Some(v) = eigenvectors.iter().find(|v| v.len() != n) {
        return Err(ErrorRepr::ShapeMismatch {
            expected_rows: n,
            expected_cols: n,
            rows: v.len(),
            cols: n,
        }
        .into());
    }
    let v = CMatrix::from_fn(n, n, |i, k| eigenvectors[k][i])?;
    let v = v.as_faer();
    let identity = Mat::<c64>::identity(n, n);
    Ok((&identity - v.adjoint() * v).norm_l2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn unit(n: usize, k: usize) -> Vec<c64> {
        (0..n)
            .map(|i| c64::new(if i == k { 1.0 } else { 0.0 }, 0.0))
            .collect()
    }

    #[test]
    fn test_overlap_ignores_phase() {
        let a = vec![c64::new(0.6, 0.0), c64::new(0.0, 0.8)];
        let phase = c64::new(0.0, 1.0);
        let b: Vec<c64> = a.iter().map(|z| z * phase).collect();
        assert!((overlap(&a, &b) - 1.0).abs() < 1e-15);
        assert!((norm_l2(&a) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_standard_basis_has_no_orthogonality_loss() {
        let basis: Vec<Vec<c64>> = (0..4).map(|k| unit(4, k)).collect();
        assert!(orthogonality_loss(&basis).unwrap() < 1e-15);
    }

    #[test]
    fn test_max_residual_of_exact_eigensystem_is_zero() {
        let h = CMatrix::from_fn(3, 3, |i, j| {
            c64::new(if i == j { i as f64 } else { 0.0 }, 0.0)
        })
        .unwrap();
        let sys = HermitianEigensystem {
            eigenvalues: vec![0.0, 1.0, 2.0],
            eigenvectors: (0..3).map(|k| unit(3, k)).collect(),
        };
        assert_eq!(max_residual(&h, &sys).unwrap(), 0.0);

        let wrong = CMatrix::zeros(2, 2).unwrap();
        assert_eq!(
            max_residual(&wrong, &sys).unwrap_err().kind(),
            ErrorKind::Dimension
        );
    }

    #[test]
    fn test_is_ascending() {
        assert!(is_ascending(&[-1.0, -1.0, 0.0, 3.0]));
        assert!(!is_ascending(&[1.0, 0.0]));
        assert!(is_ascending(&[]));
    }
}
