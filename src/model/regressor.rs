//! Score regressor: dot product of normalized features with learned weights.
//!
//! Scale convention (fixed, not inferred): the regressor is always trained on
//! a 0-1 pass-fraction target, so its raw output is a fraction. Downstream,
//! `blend` converts it to 0-100 "model marks" by multiplying by 100
//! unconditionally. There is deliberately no branch-on-magnitude here.

use crate::domain::{Features, RegressorParams};

/// Evaluate the linear model. Output is unbounded; interpretation and
/// clamping happen in the blender.
pub fn regress(regressor: &RegressorParams, features: Features) -> f64 {
    regressor.bias
        + regressor.weights[0] * features.z_hours
        + regressor.weights[1] * features.z_attendance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regress_is_affine() {
        let r = RegressorParams {
            weights: [0.2, 0.3],
            bias: 0.5,
        };
        let at_origin = regress(
            &r,
            Features {
                z_hours: 0.0,
                z_attendance: 0.0,
            },
        );
        assert_eq!(at_origin, 0.5);

        let shifted = regress(
            &r,
            Features {
                z_hours: 1.0,
                z_attendance: -1.0,
            },
        );
        assert!((shifted - 0.4).abs() < 1e-12);
    }
}
