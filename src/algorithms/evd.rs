//! Workspace-driven dense Hermitian eigendecomposition.
//!
//! This module exposes the reusable path: the solver's scratch memory, the eigenvalue
//! vector, and the eigenvector matrix are independently constructible resources sized for
//! a fixed order `n`, and [`solve`] fills the two output buffers from a Hermitian input
//! without allocating. Repeated solves at the same order therefore pay for allocation
//! once.
//!
//! The decomposition itself is delegated to [`faer::linalg::evd::self_adjoint_evd`],
//! which reads the lower triangle of its input, returns eigenvalues in non-decreasing
//! order, and writes the matching unit eigenvectors into the columns of the eigenvector
//! matrix.

use super::Slot;
use crate::{
    cmatrix::{CMatrix, try_alloc_zeroed},
    error::{CMatrixError, ErrorRepr},
};
use faer::{
    ColMut, Par, c64,
    dyn_stack::{MemBuffer, MemStack},
    linalg::evd::{ComputeEigenvectors, self_adjoint_evd, self_adjoint_evd_scratch},
};
use std::fmt;

const WORKSPACE: &str = "eigensolver workspace";
const EIGENVALUES: &str = "eigenvalue buffer";
const EIGENVECTORS: &str = "eigenvector buffer";

fn check_order(order: usize) -> Result<(), CMatrixError> {
    if order == 0 {
        return Err(ErrorRepr::EmptyMatrix.into());
    }
    Ok(())
}

/// Scratch memory for Hermitian eigendecompositions of a fixed order.
///
/// The parallelism used by the solver is chosen at construction, because the amount of
/// scratch memory required depends on it.
pub struct EvdWorkspace {
    order: usize,
    par: Par,
    buffer: Slot<MemBuffer>,
}

impl EvdWorkspace {
    /// Allocates a sequential workspace for matrices of order `order`.
    ///
    /// # Errors
    /// A dimension error if `order` is zero, or an allocation error if the scratch memory
    /// cannot be acquired.
    pub fn new(order: usize) -> Result<Self, CMatrixError> {
        Self::with_parallelism(order, Par::Seq)
    }

    /// Allocates a workspace for matrices of order `order`, solved with parallelism `par`.
    pub fn with_parallelism(order: usize, par: Par) -> Result<Self, CMatrixError> {
        check_order(order)?;
        let req = self_adjoint_evd_scratch::<c64>(
            order,
            ComputeEigenvectors::Yes,
            par,
            Default::default(),
        );
        let buffer =
            MemBuffer::try_new(req).map_err(|_| ErrorRepr::WorkspaceAllocation { order })?;
        log::debug!("Allocated {WORKSPACE} for order {order}.");
        Ok(Self {
            order,
            par,
            buffer: Slot::new(WORKSPACE, buffer),
        })
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn parallelism(&self) -> Par {
        self.par
    }

    /// Frees the scratch memory. Subsequent solves with this workspace fail with a state
    /// error. Releasing twice is a no-op.
    pub fn release(&mut self) {
        self.buffer.release();
    }

    pub fn is_released(&self) -> bool {
        self.buffer.is_released()
    }
}

impl fmt::Debug for EvdWorkspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvdWorkspace")
            .field("order", &self.order)
            .field("released", &self.is_released())
            .finish_non_exhaustive()
    }
}

/// The eigenvalues of one decomposition, in non-decreasing order.
#[derive(Debug)]
pub struct Eigenvalues {
    order: usize,
    // The solver writes eigenvalues in the scalar type of the input; the imaginary
    // parts are always zero.
    values: Slot<Vec<c64>>,
}

impl Eigenvalues {
    /// Allocates a zeroed eigenvalue buffer of length `order`.
    pub fn new(order: usize) -> Result<Self, CMatrixError> {
        check_order(order)?;
        let values = try_alloc_zeroed(order, EIGENVALUES)?;
        Ok(Self {
            order,
            values: Slot::new(EIGENVALUES, values),
        })
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns eigenvalue `k`.
    ///
    /// # Errors
    /// An index error if `k >= order`, or a state error if the buffer was released.
    pub fn get(&self, k: usize) -> Result<f64, CMatrixError> {
        let values = self.values.get()?;
        values.get(k).map(|z| z.re).ok_or_else(|| {
            ErrorRepr::IndexOutOfBounds {
                row: k,
                col: 0,
                nrows: self.order,
                ncols: 1,
            }
            .into()
        })
    }

    /// Copies the eigenvalues out as real numbers.
    pub fn to_vec(&self) -> Result<Vec<f64>, CMatrixError> {
        Ok(self.values.get()?.iter().map(|z| z.re).collect())
    }

    pub fn release(&mut self) {
        self.values.release();
    }

    pub fn is_released(&self) -> bool {
        self.values.is_released()
    }
}

/// The eigenvectors of one decomposition, stored as the columns of an `order × order`
/// matrix. Column `k` belongs to eigenvalue `k`.
#[derive(Debug)]
pub struct Eigenvectors {
    order: usize,
    vectors: Slot<CMatrix>,
}

impl Eigenvectors {
    /// Allocates a zeroed `order × order` eigenvector buffer.
    pub fn new(order: usize) -> Result<Self, CMatrixError> {
        check_order(order)?;
        let vectors = CMatrix::zeros(order, order)?;
        Ok(Self {
            order,
            vectors: Slot::new(EIGENVECTORS, vectors),
        })
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Borrows the eigenvector matrix. Eigenvector `k` is column `k`.
    pub fn matrix(&self) -> Result<&CMatrix, CMatrixError> {
        self.vectors.get()
    }

    /// Returns eigenvector `k`, i.e. column `k` of the eigenvector matrix.
    pub fn vector(&self, k: usize) -> Result<&[c64], CMatrixError> {
        self.vectors.get()?.column(k)
    }

    /// Transcribes the eigenvector matrix into one `Vec` per eigenvector.
    ///
    /// The outer index is the eigenpair index and the inner index the component, so the
    /// result is the column list of the matrix, not a row-major dump of it.
    pub fn to_columns(&self) -> Result<Vec<Vec<c64>>, CMatrixError> {
        let vectors = self.vectors.get()?;
        (0..self.order)
            .map(|k| vectors.column(k).map(<[c64]>::to_vec))
            .collect()
    }

    pub fn release(&mut self) {
        self.vectors.release();
    }

    pub fn is_released(&self) -> bool {
        self.vectors.is_released()
    }
}

/// Computes the full eigendecomposition of the Hermitian matrix `h`.
///
/// `h` must be `n × n` where `n` is the workspace order, and both output buffers must
/// have been allocated for the same order. Only the lower triangle and the real part of
/// the diagonal of `h` are read; use [`hermitise`](crate::hermitise) first if the input
/// is not already Hermitian.
///
/// On success `eigenvalues` holds the `n` eigenvalues in non-decreasing order and column
/// `k` of `eigenvectors` holds the unit eigenvector for eigenvalue `k`.
///
/// # Errors
/// - A dimension error if any buffer or `h` does not match the workspace order.
/// - A state error if any of the three resources has been released.
/// - A solver error if the decomposition fails to converge or yields non-finite
///   eigenvalues. Both output buffers are cleared to zero in that case, so no partial
///   eigenpairs are observable.
pub fn solve(
    h: &CMatrix,
    workspace: &mut EvdWorkspace,
    eigenvalues: &mut Eigenvalues,
    eigenvectors: &mut Eigenvectors,
) -> Result<(), CMatrixError> {
    let n = workspace.order;
    if h.dims() != (n, n) {
        return Err(ErrorRepr::ShapeMismatch {
            expected_rows: n,
            expected_cols: n,
            rows: h.nrows(),
            cols: h.ncols(),
        }
        .into());
    }
    for (resource, actual) in [
        (EIGENVALUES, eigenvalues.order),
        (EIGENVECTORS, eigenvectors.order),
    ] {
        if actual != n {
            return Err(ErrorRepr::OrderMismatch {
                resource,
                expected: n,
                actual,
            }
            .into());
        }
    }

    let par = workspace.par;
    let buffer = workspace.buffer.get_mut()?;
    let values = eigenvalues.values.get_mut()?;
    let vectors = eigenvectors.vectors.get_mut()?;

    log::trace!("Solving Hermitian eigenproblem of order {n}.");
    let stack = MemStack::new(buffer);
    let result = self_adjoint_evd(
        h.as_faer(),
        ColMut::from_slice_mut(values.as_mut_slice()).as_diagonal_mut(),
        Some(vectors.as_faer_mut()),
        par,
        stack,
        Default::default(),
    );

    // NaN input does not make the decomposition fail; it surfaces in the output.
    let failure = match result {
        Err(e) => Some(ErrorRepr::Evd(e)),
        Ok(()) if !values.iter().all(|z| z.re.is_finite()) => Some(ErrorRepr::NonFinite),
        Ok(()) => None,
    };
    if let Some(repr) = failure {
        log::debug!("Hermitian eigensolver failed for order {n}: {repr:?}");
        values.fill(c64::new(0.0, 0.0));
        vectors.fill_zero();
        return Err(repr.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const EPS: f64 = 1e-12;

    fn pauli_y() -> CMatrix {
        CMatrix::from_fn(2, 2, |i, j| match (i, j) {
            (0, 1) => c64::new(0.0, -1.0),
            (1, 0) => c64::new(0.0, 1.0),
            _ => c64::new(0.0, 0.0),
        })
        .unwrap()
    }

    fn alloc(n: usize) -> (EvdWorkspace, Eigenvalues, Eigenvectors) {
        (
            EvdWorkspace::new(n).unwrap(),
            Eigenvalues::new(n).unwrap(),
            Eigenvectors::new(n).unwrap(),
        )
    }

    #[test]
    fn test_solve_fills_ascending_eigenvalues() {
        let (mut ws, mut evals, mut evecs) = alloc(2);
        solve(&pauli_y(), &mut ws, &mut evals, &mut evecs).unwrap();
        assert!((evals.get(0).unwrap() + 1.0).abs() < EPS);
        assert!((evals.get(1).unwrap() - 1.0).abs() < EPS);
        assert_eq!(evecs.to_columns().unwrap().len(), 2);
    }

    #[test]
    fn test_workspace_is_reusable() {
        let (mut ws, mut evals, mut evecs) = alloc(2);
        for scale in [1.0_f64, 2.0, -3.0] {
            let mut h = pauli_y();
            h.scale(c64::new(scale, 0.0));
            solve(&h, &mut ws, &mut evals, &mut evecs).unwrap();
            assert!((evals.get(0).unwrap() + scale.abs()).abs() < EPS);
            assert!((evals.get(1).unwrap() - scale.abs()).abs() < EPS);
        }
    }

    #[test]
    fn test_zero_order_is_rejected() {
        assert_eq!(EvdWorkspace::new(0).unwrap_err().kind(), ErrorKind::Dimension);
        assert_eq!(Eigenvalues::new(0).unwrap_err().kind(), ErrorKind::Dimension);
        assert_eq!(Eigenvectors::new(0).unwrap_err().kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_mismatched_orders_are_rejected() {
        let mut ws = EvdWorkspace::new(2).unwrap();
        let mut evals = Eigenvalues::new(3).unwrap();
        let mut evecs = Eigenvectors::new(2).unwrap();
        let err = solve(&pauli_y(), &mut ws, &mut evals, &mut evecs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
        assert_eq!(
            err.to_string(),
            "Dimension error: eigenvalue buffer has order 3, but the workspace has order 2."
        );

        let (mut ws, mut evals, mut evecs) = alloc(3);
        let err = solve(&pauli_y(), &mut ws, &mut evals, &mut evecs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_solve_after_release_is_state_error() {
        let (mut ws, mut evals, mut evecs) = alloc(2);
        solve(&pauli_y(), &mut ws, &mut evals, &mut evecs).unwrap();

        ws.release();
        assert!(ws.is_released());
        ws.release();
        let err = solve(&pauli_y(), &mut ws, &mut evals, &mut evecs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);

        let (mut ws, mut evals, mut evecs) = alloc(2);
        evecs.release();
        let err = solve(&pauli_y(), &mut ws, &mut evals, &mut evecs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(evecs.to_columns().unwrap_err().kind(), ErrorKind::State);

        evals.release();
        assert_eq!(evals.to_vec().unwrap_err().kind(), ErrorKind::State);
        assert_eq!(evals.get(0).unwrap_err().kind(), ErrorKind::State);
    }

    fn assert_cleared(evals: &Eigenvalues, evecs: &Eigenvectors) {
        assert!(evals.to_vec().unwrap().iter().all(|&l| l == 0.0));
        let zero = c64::new(0.0, 0.0);
        for col in evecs.to_columns().unwrap() {
            assert!(col.iter().all(|&z| z == zero));
        }
    }

    #[test]
    fn test_nan_input_is_solver_error_and_clears_buffers() {
        let (mut ws, mut evals, mut evecs) = alloc(3);
        let good = CMatrix::identity(3).unwrap();
        solve(&good, &mut ws, &mut evals, &mut evecs).unwrap();

        let mut bad = CMatrix::identity(3).unwrap();
        bad.set(2, 0, c64::new(f64::NAN, 0.0)).unwrap();
        bad.set(0, 2, c64::new(f64::NAN, 0.0)).unwrap();
        let err = solve(&bad, &mut ws, &mut evals, &mut evecs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Solver);
        assert_cleared(&evals, &evecs);

        // The buffers stay usable after a failure.
        solve(&good, &mut ws, &mut evals, &mut evecs).unwrap();
        assert!((evals.get(0).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_infinite_input_is_solver_error_and_clears_buffers() {
        let (mut ws, mut evals, mut evecs) = alloc(2);
        solve(&pauli_y(), &mut ws, &mut evals, &mut evecs).unwrap();

        let mut bad = pauli_y();
        bad.set(0, 0, c64::new(f64::INFINITY, 0.0)).unwrap();
        let err = solve(&bad, &mut ws, &mut evals, &mut evecs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Solver);
        assert_cleared(&evals, &evecs);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_workspace_is_allocation_error() {
        let err = EvdWorkspace::new(1 << 31).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Allocation);
        assert_eq!(
            err.to_string(),
            "Allocation error: failed to acquire the eigensolver workspace for order 2147483648."
        );
    }

    #[test]
    fn test_eigenvalue_index_out_of_range() {
        let evals = Eigenvalues::new(2).unwrap();
        assert_eq!(evals.get(2).unwrap_err().kind(), ErrorKind::Index);
    }

    #[test]
    fn test_columns_follow_eigenpair_index() {
        // diag(2, 1): eigenvalue 1 belongs to e_1, eigenvalue 2 to e_0.
        let h = CMatrix::from_fn(2, 2, |i, j| {
            if i == j {
                c64::new(2.0 - i as f64, 0.0)
            } else {
                c64::new(0.0, 0.0)
            }
        })
        .unwrap();
        let (mut ws, mut evals, mut evecs) = alloc(2);
        solve(&h, &mut ws, &mut evals, &mut evecs).unwrap();
        assert_eq!(evals.to_vec().unwrap().len(), 2);
        let v0 = evecs.vector(0).unwrap();
        let v1 = evecs.vector(1).unwrap();
        assert!((v0[1].norm() - 1.0).abs() < EPS && v0[0].norm() < EPS);
        assert!((v1[0].norm() - 1.0).abs() < EPS && v1[1].norm() < EPS);
    }
}
