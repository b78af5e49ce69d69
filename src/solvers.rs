//! This module provides a high-level, user-friendly API for computing the full
//! eigendecomposition of a Hermitian matrix.
//!
//! Two entry points are offered:
//!
//! - [`eigensystem_hermitian`] is a one-shot call: it symmetrises the input, acquires every
//!   buffer the solver needs, solves, transcribes the result, and releases everything
//!   before returning, on success and on failure alike.
//! - [`HermitianEigensolver`] owns a complete set of buffers for a fixed order and reuses
//!   them across calls, so repeated solves do not allocate.

use crate::{
    algorithms::evd::{Eigenvalues, Eigenvectors, EvdWorkspace, solve},
    cmatrix::CMatrix,
    error::{CMatrixError, ErrorRepr},
    hermitise::{hermitise, hermitise_into, square_order},
    matrix::MatrixView,
};
use faer::{Par, c64};

/// The eigenvalues and eigenvectors of a Hermitian matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct HermitianEigensystem {
    /// The `n` eigenvalues in non-decreasing order.
    pub eigenvalues: Vec<f64>,
    /// `eigenvectors[k]` is the unit eigenvector belonging to `eigenvalues[k]`.
    pub eigenvectors: Vec<Vec<c64>>,
}

impl HermitianEigensystem {
    /// Number of eigenpairs.
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Splits the eigensystem into `(eigenvalues, eigenvectors)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<Vec<c64>>) {
        (self.eigenvalues, self.eigenvectors)
    }
}

fn nonempty_order<V: MatrixView + ?Sized>(m: &V) -> Result<usize, CMatrixError> {
    let n = square_order(m)?;
    if n == 0 {
        return Err(ErrorRepr::EmptyMatrix.into());
    }
    Ok(n)
}

/// Computes every eigenvalue and eigenvector of the Hermitian matrix described by the
/// lower triangle of `m`.
///
/// The upper triangle of `m` is ignored and replaced by the conjugate transpose of the
/// lower triangle before solving. Eigenvectors are unique only up to a unit complex
/// factor, so callers comparing them against references should use phase-insensitive
/// measures such as `|⟨v, w⟩|`.
///
/// # Arguments
/// * `m`: Any readable square matrix of order `n >= 1`.
///
/// # Returns
/// A [`HermitianEigensystem`] with eigenvalues in non-decreasing order, or a
/// [`CMatrixError`]: a dimension error for non-square or empty input, an allocation error
/// if a buffer cannot be acquired, or a solver error on non-convergence or non-finite
/// results. No partial results are returned on failure.
pub fn eigensystem_hermitian<V: MatrixView + ?Sized>(
    m: &V,
) -> Result<HermitianEigensystem, CMatrixError> {
    let n = nonempty_order(m)?;
    let h = hermitise(m)?;

    // Each buffer is released when it goes out of scope, including on the early returns
    // below.
    let mut workspace = EvdWorkspace::new(n)?;
    let mut eigenvalues = Eigenvalues::new(n)?;
    let mut eigenvectors = Eigenvectors::new(n)?;

    solve(&h, &mut workspace, &mut eigenvalues, &mut eigenvectors)?;

    Ok(HermitianEigensystem {
        eigenvalues: eigenvalues.to_vec()?,
        eigenvectors: eigenvectors.to_columns()?,
    })
}

/// A reusable Hermitian eigensolver for matrices of one fixed order.
///
/// The solver owns the symmetrised input buffer, the scratch workspace, and both output
/// buffers. Each call to [`solve`](Self::solve) overwrites the previous results.
///
/// # Example
///
/// ```
/// use cmatrix::{HermitianEigensolver, RowMatrix};
/// use faer::c64;
///
/// let sigma_x = RowMatrix::from_rows(vec![
///     vec![c64::new(0.0, 0.0), c64::new(1.0, 0.0)],
///     vec![c64::new(1.0, 0.0), c64::new(0.0, 0.0)],
/// ])
/// .unwrap();
///
/// let mut solver = HermitianEigensolver::new(2).unwrap();
/// solver.solve(&sigma_x).unwrap();
/// let evals = solver.eigenvalues().to_vec().unwrap();
/// assert!((evals[0] + 1.0).abs() < 1e-12);
/// assert!((evals[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct HermitianEigensolver {
    hermitian: CMatrix,
    workspace: EvdWorkspace,
    eigenvalues: Eigenvalues,
    eigenvectors: Eigenvectors,
}

impl HermitianEigensolver {
    /// Allocates a sequential solver for matrices of order `order`.
    pub fn new(order: usize) -> Result<Self, CMatrixError> {
        Self::with_parallelism(order, Par::Seq)
    }

    /// Allocates a solver for matrices of order `order` using parallelism `par`.
    pub fn with_parallelism(order: usize, par: Par) -> Result<Self, CMatrixError> {
        let workspace = EvdWorkspace::with_parallelism(order, par)?;
        Ok(Self {
            hermitian: CMatrix::zeros(order, order)?,
            workspace,
            eigenvalues: Eigenvalues::new(order)?,
            eigenvectors: Eigenvectors::new(order)?,
        })
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.workspace.order()
    }

    /// Symmetrises `m` from its lower triangle and solves it in place.
    ///
    /// # Errors
    /// A dimension error if `m` is not of the solver's order, or a solver error on
    /// non-convergence or non-finite results. After a solver error the eigenpair buffers
    /// are zeroed.
    pub fn solve<V: MatrixView + ?Sized>(&mut self, m: &V) -> Result<(), CMatrixError> {
        hermitise_into(m, &mut self.hermitian)?;
        solve(
            &self.hermitian,
            &mut self.workspace,
            &mut self.eigenvalues,
            &mut self.eigenvectors,
        )
    }

    /// The eigenvalues from the most recent solve.
    ///
    /// A failed solve clears the buffer to zero, so after an error this holds zeros
    /// rather than the results of an earlier call.
    pub fn eigenvalues(&self) -> &Eigenvalues {
        &self.eigenvalues
    }

    /// The eigenvectors from the most recent solve. Zeroed after a failed solve.
    pub fn eigenvectors(&self) -> &Eigenvectors {
        &self.eigenvectors
    }

    /// Copies the current results out into an owned [`HermitianEigensystem`].
    pub fn to_eigensystem(&self) -> Result<HermitianEigensystem, CMatrixError> {
        Ok(HermitianEigensystem {
            eigenvalues: self.eigenvalues.to_vec()?,
            eigenvectors: self.eigenvectors.to_columns()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, rows::RowMatrix};

    #[test]
    fn test_non_square_input_is_dimension_error() {
        let m = CMatrix::zeros(2, 3).unwrap();
        let err = eigensystem_hermitian(&m).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_empty_input_is_dimension_error() {
        let m = RowMatrix::zeros(0, 0);
        let err = eigensystem_hermitian(&m).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
        assert_eq!(
            err.to_string(),
            "Dimension error: the eigensolver requires a matrix of order at least 1."
        );
    }

    #[test]
    fn test_one_by_one() {
        let m = CMatrix::from_fn(1, 1, |_, _| c64::new(-2.5, 0.0)).unwrap();
        let (evals, evecs) = eigensystem_hermitian(&m).unwrap().into_parts();
        assert_eq!(evals.len(), 1);
        assert!((evals[0] + 2.5).abs() < 1e-12);
        assert!((evecs[0][0].norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_upper_triangle_is_ignored() {
        // Lower triangle of sigma_x with a garbage upper triangle.
        let m = RowMatrix::from_rows(vec![
            vec![c64::new(0.0, 0.0), c64::new(100.0, -7.0)],
            vec![c64::new(1.0, 0.0), c64::new(0.0, 0.0)],
        ])
        .unwrap();
        let sys = eigensystem_hermitian(&m).unwrap();
        assert!((sys.eigenvalues[0] + 1.0).abs() < 1e-12);
        assert!((sys.eigenvalues[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reusable_solver_matches_one_shot() {
        let m = CMatrix::from_fn(3, 3, |i, j| {
            if i == j {
                c64::new(i as f64 + 1.0, 0.0)
            } else {
                c64::new(0.5, (i as f64) - (j as f64))
            }
        })
        .unwrap();
        let one_shot = eigensystem_hermitian(&m).unwrap();

        let mut solver = HermitianEigensolver::new(3).unwrap();
        solver.solve(&m).unwrap();
        let reused = solver.to_eigensystem().unwrap();
        for (a, b) in one_shot.eigenvalues.iter().zip(&reused.eigenvalues) {
            assert!((a - b).abs() < 1e-12);
        }

        let wrong = CMatrix::zeros(2, 2).unwrap();
        assert_eq!(
            solver.solve(&wrong).unwrap_err().kind(),
            ErrorKind::Dimension
        );
    }
}
