//! Named constant tables for the heuristic blender.
//!
//! Observed dashboard variants differ only in constants (blend weight, clamp
//! band, pass threshold), so each variant is a preset of the same algorithm
//! rather than a separate code path.
//!
//! Every preset must satisfy:
//!
//! - `marks_floor < pass_threshold <= marks_ceiling`
//! - `penalty_marks_cap < pass_threshold` (the effort penalty always fails)
//! - `sigmoid((penalty_marks_cap - pass_threshold) / temperature)
//!    <= penalty_prob_cap`
//!
//! so the penalty invariants (marks <= 45, probability <= 0.30, FAIL) hold by
//! construction. `preset_table_is_consistent` pins this in tests.

use crate::domain::PresetName;

/// Tunable constants for one blending policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendPreset {
    pub name: PresetName,

    /// Weight on model marks in the blend; `1 - alpha` goes to the
    /// expected-marks heuristic.
    pub alpha: f64,
    /// Expected-marks weight per daily study hour.
    pub w_study: f64,
    /// Expected-marks weight per attendance point.
    pub w_attendance: f64,

    /// Presentable marks band. The floor keeps output plausible; the ceiling
    /// keeps it from looking overconfident.
    pub marks_floor: f64,
    pub marks_ceiling: f64,

    /// Marks at which the verdict flips to PASS, and the smoothing constant
    /// for the published probability `sigmoid((marks - threshold) / temp)`.
    pub pass_threshold: f64,
    pub temperature: f64,

    /// Effort-penalty trigger thresholds.
    pub min_study_hours: f64,
    pub min_attendance_pct: f64,
    /// Hard caps applied when the penalty fires.
    pub penalty_marks_cap: f64,
    pub penalty_prob_cap: f64,
}

/// Default policy. `alpha`, the expected-marks weights, and the clamp band
/// follow the constants observed in production dashboards.
pub const BALANCED: BlendPreset = BlendPreset {
    name: PresetName::Balanced,
    alpha: 0.6,
    w_study: 10.0,
    w_attendance: 0.5,
    marks_floor: 35.0,
    marks_ceiling: 90.0,
    pass_threshold: 50.0,
    temperature: 5.0,
    min_study_hours: 3.0,
    min_attendance_pct: 40.0,
    penalty_marks_cap: 45.0,
    penalty_prob_cap: 0.30,
};

/// Trusts the model less and passes later.
pub const CONSERVATIVE: BlendPreset = BlendPreset {
    name: PresetName::Conservative,
    alpha: 0.4,
    w_study: 10.0,
    w_attendance: 0.5,
    marks_floor: 35.0,
    marks_ceiling: 85.0,
    pass_threshold: 55.0,
    temperature: 6.0,
    min_study_hours: 3.0,
    min_attendance_pct: 40.0,
    penalty_marks_cap: 45.0,
    penalty_prob_cap: 0.30,
};

/// Trusts the model more and allows a higher ceiling.
pub const OPTIMISTIC: BlendPreset = BlendPreset {
    name: PresetName::Optimistic,
    alpha: 0.7,
    w_study: 10.0,
    w_attendance: 0.5,
    marks_floor: 40.0,
    marks_ceiling: 95.0,
    pass_threshold: 50.0,
    temperature: 4.0,
    min_study_hours: 3.0,
    min_attendance_pct: 40.0,
    penalty_marks_cap: 45.0,
    penalty_prob_cap: 0.30,
};

pub const ALL_PRESETS: [&BlendPreset; 3] = [&BALANCED, &CONSERVATIVE, &OPTIMISTIC];

impl PresetName {
    pub fn preset(self) -> &'static BlendPreset {
        match self {
            PresetName::Balanced => &BALANCED,
            PresetName::Conservative => &CONSERVATIVE,
            PresetName::Optimistic => &OPTIMISTIC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::sigmoid;

    #[test]
    fn preset_table_is_consistent() {
        for p in ALL_PRESETS {
            assert!(p.alpha > 0.0 && p.alpha < 1.0, "{:?}", p.name);
            assert!(p.marks_floor < p.pass_threshold, "{:?}", p.name);
            assert!(p.pass_threshold <= p.marks_ceiling, "{:?}", p.name);
            assert!(p.penalty_marks_cap < p.pass_threshold, "{:?}", p.name);

            // The re-derived probability at the penalty cap must respect the
            // penalty probability cap.
            let at_cap = sigmoid((p.penalty_marks_cap - p.pass_threshold) / p.temperature);
            assert!(
                at_cap <= p.penalty_prob_cap,
                "{:?}: sigmoid at penalty cap = {at_cap}",
                p.name
            );
        }
    }

    #[test]
    fn name_lookup_matches_table() {
        assert_eq!(PresetName::Balanced.preset().name, PresetName::Balanced);
        assert_eq!(
            PresetName::Conservative.preset().name,
            PresetName::Conservative
        );
        assert_eq!(PresetName::Optimistic.preset().name, PresetName::Optimistic);
    }
}
