//! Feature normalizer: `(x - mean) / scale` per feature.

use crate::domain::{Features, RawInput, ScalerParams};

/// Apply the offline-learned affine transform to (already clamped) inputs.
///
/// Scales are validated to be positive and finite at artifact load, so the
/// output is finite for any clamped input.
pub fn normalize(scaler: &ScalerParams, raw: RawInput) -> Features {
    Features {
        z_hours: (raw.study_hours - scaler.means[0]) / scaler.scales[0],
        z_attendance: (raw.attendance_pct - scaler.means[1]) / scaler.scales[1],
    }
}
