//! Dense complex matrices and a workspace-driven Hermitian eigensolver.
//!
//! This crate provides a minimal dense matrix type for double-precision complex numbers
//! and one nontrivial operation on it: the full eigendecomposition of a Hermitian matrix,
//! i.e. all `n` real eigenvalues in non-decreasing order together with an orthonormal set
//! of eigenvectors.
//!
//! Built on the [`faer`] linear algebra framework, the solver runs on scratch memory from
//! a [`faer::dyn_stack::MemBuffer`] that can be allocated once and reused across solves.
//!
//! ## Layers
//!
//! **Matrix values** ([`CMatrix`], [`RowMatrix`]): owned storage with bounds-checked
//! element access and simple in-place arithmetic. Both, along with `faer`'s own dense
//! complex matrices, implement the read capability [`MatrixView`].
//!
//! **Symmetrisation** ([`hermitise`]): builds the Hermitian matrix described by the lower
//! triangle of any [`MatrixView`], reflecting conjugates into the upper triangle.
//!
//! **Eigensolver** ([`eigensystem_hermitian`], [`HermitianEigensolver`],
//! [`algorithms::evd`]): the one-shot call acquires and releases every buffer itself; the
//! reusable path exposes the workspace and output buffers as separately owned resources.
//!
//! ## Example Usage
//!
//! The following example computes the eigensystem of the Pauli matrix σ_y, supplying
//! only its lower triangle.
//!
//! ```rust
//! use cmatrix::{CMatrix, eigensystem_hermitian, utils::metrics::overlap};
//! use faer::c64;
//!
//! let mut sigma_y = CMatrix::zeros(2, 2).unwrap();
//! sigma_y.set(1, 0, c64::new(0.0, 1.0)).unwrap();
//!
//! let sys = eigensystem_hermitian(&sigma_y).unwrap();
//! assert!((sys.eigenvalues[0] + 1.0).abs() < 1e-12);
//! assert!((sys.eigenvalues[1] - 1.0).abs() < 1e-12);
//!
//! // Eigenvectors are only defined up to a phase, so compare overlaps.
//! let s = std::f64::consts::FRAC_1_SQRT_2;
//! let plus = [c64::new(s, 0.0), c64::new(0.0, s)];
//! assert!((overlap(&sys.eigenvectors[1], &plus) - 1.0).abs() < 1e-12);
//! ```
//!
//! For repeated solves at a fixed order, allocate the buffers once:
//!
//! ```rust
//! use cmatrix::{
//!     CMatrix, hermitise,
//!     algorithms::evd::{Eigenvalues, Eigenvectors, EvdWorkspace, solve},
//! };
//! use faer::c64;
//!
//! let n = 3;
//! let mut workspace = EvdWorkspace::new(n).unwrap();
//! let mut evals = Eigenvalues::new(n).unwrap();
//! let mut evecs = Eigenvectors::new(n).unwrap();
//!
//! for shift in 0..3 {
//!     let m = CMatrix::from_fn(n, n, |i, j| {
//!         if i == j { c64::new((i + shift) as f64, 0.0) } else { c64::new(0.0, 0.0) }
//!     })
//!     .unwrap();
//!     let h = hermitise(&m).unwrap();
//!     solve(&h, &mut workspace, &mut evals, &mut evecs).unwrap();
//!     assert!((evals.get(0).unwrap() - shift as f64).abs() < 1e-12);
//! }
//!
//! workspace.release();
//! assert!(workspace.is_released());
//! ```

// Declare the modules that form the crate's API structure.
pub mod algorithms;
pub mod cmatrix;
pub mod error;
pub mod hermitise;
pub mod matrix;
pub mod rows;
pub mod solvers;
pub mod utils;

// Re-export the main API for convenient access.
pub use cmatrix::CMatrix;
pub use error::{CMatrixError, ErrorKind};
pub use hermitise::{hermitise, hermitise_into};
pub use matrix::MatrixView;
pub use rows::RowMatrix;
pub use solvers::{HermitianEigensolver, HermitianEigensystem, eigensystem_hermitian};
