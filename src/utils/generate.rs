//! Seeded random test problems.
//!
//! Every generator takes an explicit seed so that tests and experiment runs are
//! reproducible.

use crate::{cmatrix::CMatrix, error::CMatrixError};
use faer::c64;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Creates an `n × n` matrix whose lower triangle describes a random Hermitian matrix.
///
/// Off-diagonal entries of the lower triangle have real and imaginary parts drawn
/// uniformly from `[-1, 1)`, and the diagonal is real. The upper triangle is filled with
/// unrelated random values, so the result is *not* Hermitian until it has been passed
/// through [`hermitise`](crate::hermitise).
pub fn random_lower(n: usize, seed: u64) -> Result<CMatrix, CMatrixError> {
    let mut rng = StdRng::seed_from_u64(seed);
    CMatrix::from_fn(n, n, |i, j| {
        let re = rng.random_range(-1.0..1.0);
        let im = rng.random_range(-1.0..1.0);
        if i == j { c64::new(re, 0.0) } else { c64::new(re, im) }
    })
}

/// Creates an `n × n` Hermitian matrix with tightly clustered eigenvalues.
///
/// The diagonal holds the values `0, 1, 2, …` repeated in groups of `cluster` (each
/// nudged apart by `1e-10`), and a random Hermitian perturbation of magnitude
/// `perturbation` couples all entries. Such spectra stress the orthogonality of the
/// computed eigenvectors.
pub fn clustered_diagonal(
    n: usize,
    cluster: usize,
    perturbation: f64,
    seed: u64,
) -> Result<CMatrix, CMatrixError> {
    let cluster = cluster.max(1);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = CMatrix::zeros(n, n)?;
    for j in 0..n {
        m[(j, j)] = c64::new((j / cluster) as f64 + 1e-10 * j as f64, 0.0);
        for i in j + 1..n {
            let z = c64::new(
                perturbation * rng.random_range(-1.0..1.0),
                perturbation * rng.random_range(-1.0..1.0),
            );
            m[(i, j)] = z;
            m[(j, i)] = z.conj();
        }
    }
    Ok(m)
}
