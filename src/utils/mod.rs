//! Supporting utilities for tests and the experiment runners.
//!
//! - **`generate`**: Seeded random test problems, either dense lower-triangle-filled
//!   matrices or diagonally dominated matrices with clustered spectra.
//!
//! - **`metrics`**: Accuracy measurements for a computed eigensystem: the largest
//!   residual `‖Hv − λv‖∞` and the loss of orthogonality `‖I − VᴴV‖_F`.
//!
//! - **`perf`**: Platform-specific reading of the process's peak resident set size,
//!   used by the memory experiments.

pub mod generate;
pub mod metrics;
pub mod perf;
