//! Least squares solver used by the offline trainer.
//!
//! Both trained stages reduce to small linear systems:
//!
//! - the score regressor is ordinary least squares on the scaled features
//! - the logistic classifier is fit by IRLS, which solves a weighted least
//!   squares problem per iteration
//!
//! Implementation choices:
//! - SVD solve, so tall design matrices (many rows, 3-4 columns) are handled
//!   robustly. (Nalgebra's `QR::solve` is intended for square systems.)
//! - The parameter dimension is tiny, so SVD performance is a non-issue.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails. Nearly
    // collinear columns can appear when a feature barely varies.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
