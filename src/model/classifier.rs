//! Outcome classifier: logistic model over [features ++ regression score].

use crate::domain::{ClassifierParams, Features};
use crate::math::sigmoid;

/// Evaluate the logistic model and return a probability in `[0, 1]`.
///
/// The output is clamped defensively even though a well-formed logistic
/// stays in range: loaded parameters could push the linear term to a
/// non-finite value, and presentation must always see a bounded number.
/// A non-finite result clamps to `0.0`.
pub fn classify(classifier: &ClassifierParams, features: Features, regression_score: f64) -> f64 {
    let eta = classifier.bias
        + classifier.weights[0] * features.z_hours
        + classifier.weights[1] * features.z_attendance
        + classifier.weights[2] * regression_score;

    let p = sigmoid(eta);
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
}
