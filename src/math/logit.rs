//! Logistic primitives: a numerically stable sigmoid and an IRLS fitter.
//!
//! The classifier is a plain logistic regression. Fitting is done with
//! iteratively reweighted least squares (IRLS): each iteration solves a
//! weighted least squares problem, which reuses `ols::solve_least_squares`.
//! A small ridge term keeps the iteration bounded on (nearly) separable
//! data, where unpenalized logistic coefficients diverge.

use nalgebra::{DMatrix, DVector};

use crate::math::solve_least_squares;

/// Ridge penalty applied per IRLS iteration.
const RIDGE: f64 = 1e-4;

/// Floor on the IRLS variance weight `mu * (1 - mu)`.
const MIN_VAR: f64 = 1e-6;

/// Convergence threshold on the max coefficient change.
const TOL: f64 = 1e-8;

/// Numerically stable logistic function.
///
/// Computed as `exp(x) / (1 + exp(x))` for negative `x` to avoid overflow;
/// output is always in `[0, 1]` for finite input.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Fit logistic regression coefficients by IRLS.
///
/// `x` is the design matrix (intercept column included by the caller), `y`
/// holds 0/1 labels. Returns `None` if the inner solve fails or produces
/// non-finite coefficients.
pub fn fit_logistic(x: &DMatrix<f64>, y: &DVector<f64>, max_iters: usize) -> Option<DVector<f64>> {
    let n = x.nrows();
    let p = x.ncols();
    if n == 0 || p == 0 || y.len() != n {
        return None;
    }

    let mut beta = DVector::<f64>::zeros(p);

    for _ in 0..max_iters.max(1) {
        let eta = x * &beta;

        // Weighted working-response system, with sqrt(ridge) rows appended so
        // the normal equations become (X^T W X + ridge * I).
        let mut xw = DMatrix::<f64>::zeros(n + p, p);
        let mut zw = DVector::<f64>::zeros(n + p);

        for i in 0..n {
            let mu = sigmoid(eta[i]);
            let w = (mu * (1.0 - mu)).max(MIN_VAR);
            let z = eta[i] + (y[i] - mu) / w;
            let sw = w.sqrt();
            for j in 0..p {
                xw[(i, j)] = x[(i, j)] * sw;
            }
            zw[i] = z * sw;
        }
        let ridge_sqrt = RIDGE.sqrt();
        for j in 0..p {
            xw[(n + j, j)] = ridge_sqrt;
        }

        let next = solve_least_squares(&xw, &zw)?;
        let delta = (&next - &beta).amax();
        beta = next;
        if delta < TOL {
            break;
        }
    }

    if beta.iter().all(|v| v.is_finite()) {
        Some(beta)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_basic_shape() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(2.0) > sigmoid(1.0));
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!((sigmoid(1.0) + sigmoid(-1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn irls_separates_simple_data() {
        // 1-D data, positive labels for x > 0.
        let xs = [-2.0, -1.5, -1.0, -0.5, 0.5, 1.0, 1.5, 2.0];
        let mut x = DMatrix::<f64>::zeros(xs.len(), 2);
        let mut y = DVector::<f64>::zeros(xs.len());
        for (i, &v) in xs.iter().enumerate() {
            x[(i, 0)] = 1.0;
            x[(i, 1)] = v;
            y[i] = if v > 0.0 { 1.0 } else { 0.0 };
        }

        let beta = fit_logistic(&x, &y, 25).unwrap();
        let p_hi = sigmoid(beta[0] + beta[1] * 2.0);
        let p_lo = sigmoid(beta[0] + beta[1] * -2.0);
        assert!(p_hi > 0.9, "p(x=2) should be high, got {p_hi}");
        assert!(p_lo < 0.1, "p(x=-2) should be low, got {p_lo}");
    }

    #[test]
    fn irls_is_deterministic() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, -1.0, 1.0, -0.5, 1.0, 0.5, 1.0, 1.0]);
        let y = DVector::from_row_slice(&[0.0, 0.0, 1.0, 1.0]);

        let a = fit_logistic(&x, &y, 25).unwrap();
        let b = fit_logistic(&x, &y, 25).unwrap();
        assert_eq!(a, b);
    }
}
