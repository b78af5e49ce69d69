//! Eigensystems of the Pauli matrices.
//!
//! Builds σ_x, σ_y and σ_z from their rows, prints each matrix, and then prints its
//! eigenvalues together with the matching eigenvectors. Run with
//! `cargo run --example pauli`.

use anyhow::Result;
use cmatrix::{CMatrix, RowMatrix, eigensystem_hermitian, utils::metrics::overlap};
use faer::c64;

const fn c(re: f64, im: f64) -> c64 {
    c64::new(re, im)
}

fn pauli_matrices() -> Result<Vec<(&'static str, RowMatrix)>> {
    let zero = c(0.0, 0.0);
    Ok(vec![
        (
            "sigma_x",
            RowMatrix::from_rows(vec![vec![zero, c(1.0, 0.0)], vec![c(1.0, 0.0), zero]])?,
        ),
        (
            "sigma_y",
            RowMatrix::from_rows(vec![vec![zero, c(0.0, -1.0)], vec![c(0.0, 1.0), zero]])?,
        ),
        (
            "sigma_z",
            RowMatrix::from_rows(vec![vec![c(1.0, 0.0), zero], vec![zero, c(-1.0, 0.0)]])?,
        ),
    ])
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;

    for (name, m) in pauli_matrices()? {
        log::info!("Solving {name}...");
        println!("{name} =\n{}", CMatrix::from_view(&m)?);

        let sys = eigensystem_hermitian(&m)?;
        for (k, (lambda, v)) in sys.eigenvalues.iter().zip(&sys.eigenvectors).enumerate() {
            println!("  lambda_{k} = {lambda:+.6}, v_{k} = [{:.6}, {:.6}]", v[0], v[1]);
        }

        // The two eigenvectors of a Pauli matrix are orthogonal.
        let cross = overlap(&sys.eigenvectors[0], &sys.eigenvectors[1]);
        println!("  |<v_0, v_1>| = {cross:.2e}\n");
    }
    Ok(())
}
