//! Heuristic blender: the one place where model output and hand-authored
//! policy interact.
//!
//! Pipeline position: raw inputs and the trained stages' outputs come in, a
//! bounded, presentable (marks, probability, verdict) triple comes out.
//!
//! Policy, in order (constants from the active `BlendPreset`):
//!
//! 1. model marks = regression score x 100 (0-1 pass-fraction convention),
//!    clamped to [0, 100]
//! 2. expected marks = `w_study * hours + w_attendance * attendance` — a
//!    sanity prior computed from raw inputs alone
//! 3. marks = `alpha * model_marks + (1 - alpha) * expected_marks`
//! 4. clamp marks into [floor, ceiling]
//! 5. effort penalty: below minimum study hours or attendance, cap marks at
//!    `penalty_marks_cap` and the probability at `penalty_prob_cap`; this
//!    overrides everything above
//! 6. the published probability is re-derived from final marks as
//!    `sigmoid((marks - pass_threshold) / temperature)`; verdict is PASS iff
//!    `marks >= pass_threshold` (equivalently probability >= 0.5). The
//!    classifier probability is carried along for reporting only.
//!
//! Non-finite intermediate values clamp to the nearest valid boundary rather
//! than propagating: presentation must always show a bounded number.

pub mod presets;

pub use presets::{ALL_PRESETS, BALANCED, BlendPreset, CONSERVATIVE, OPTIMISTIC};

use crate::domain::{RawInput, Verdict};
use crate::math::sigmoid;

/// Blender output consumed by the status mapper and presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blended {
    /// Final marks in `[preset.marks_floor, preset.marks_ceiling]`.
    pub marks: f64,
    /// Published probability, re-derived from `marks`.
    pub pass_probability: f64,
    pub verdict: Verdict,
    /// Classifier probability after defensive clamping (and the penalty
    /// cap). Reported in breakdowns; never drives the verdict.
    pub classifier_prob: f64,
    pub model_marks: f64,
    pub expected_marks: f64,
    pub penalized: bool,
}

/// The hand-authored sanity prior: marks estimated from raw inputs alone.
///
/// `raw` must already be clamped; monotone non-decreasing in both fields.
pub fn expected_marks(preset: &BlendPreset, raw: RawInput) -> f64 {
    preset.w_study * raw.study_hours + preset.w_attendance * raw.attendance_pct
}

/// Combine model output with the heuristic prior and derive the final
/// (marks, probability, verdict). `raw` must already be clamped.
pub fn blend(
    preset: &BlendPreset,
    raw: RawInput,
    regression_score: f64,
    classifier_prob: f64,
) -> Blended {
    // 1) Model marks on the 0-100 scale.
    let model_marks = if regression_score.is_finite() {
        (regression_score * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    // 2) + 3) Pull the model toward the heuristic prior.
    let expected = expected_marks(preset, raw);
    let mut marks = preset.alpha * model_marks + (1.0 - preset.alpha) * expected;

    // 4) Presentable band.
    if !marks.is_finite() {
        marks = preset.marks_floor;
    }
    marks = marks.clamp(preset.marks_floor, preset.marks_ceiling);

    // Defensive clamp on the classifier output.
    let mut classifier_prob = if classifier_prob.is_finite() {
        classifier_prob.clamp(0.0, 1.0)
    } else {
        0.0
    };

    // 5) Effort penalty: bare-minimum effort overrides the statistical models.
    let penalized =
        raw.study_hours < preset.min_study_hours || raw.attendance_pct < preset.min_attendance_pct;
    if penalized {
        marks = marks.min(preset.penalty_marks_cap);
        classifier_prob = classifier_prob.min(preset.penalty_prob_cap);
    }

    // 6) Re-derive the published probability and verdict from final marks.
    let mut pass_probability = sigmoid((marks - preset.pass_threshold) / preset.temperature);
    if !pass_probability.is_finite() {
        pass_probability = 0.0;
    }
    if penalized {
        pass_probability = pass_probability.min(preset.penalty_prob_cap);
    }

    let verdict = if marks >= preset.pass_threshold {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    Blended {
        marks,
        pass_probability,
        verdict,
        classifier_prob,
        model_marks,
        expected_marks: expected,
        penalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(study_hours: f64, attendance_pct: f64) -> RawInput {
        RawInput {
            study_hours,
            attendance_pct,
        }
        .clamped()
    }

    #[test]
    fn marks_stay_in_band_over_the_input_domain() {
        let preset = &BALANCED;
        for score in [-5.0, 0.0, 0.3, 0.5, 1.0, 5.0] {
            for h in 0..=24 {
                for a in 0..=20 {
                    let b = blend(preset, raw(h as f64 * 0.5, a as f64 * 5.0), score, 0.5);
                    assert!(
                        b.marks >= preset.marks_floor && b.marks <= preset.marks_ceiling,
                        "marks {} out of band at h={h} a={a} score={score}",
                        b.marks
                    );
                    assert!((0.0..=1.0).contains(&b.pass_probability));
                }
            }
        }
    }

    #[test]
    fn expected_marks_monotone_in_study_hours() {
        let preset = &BALANCED;
        let mut prev = f64::NEG_INFINITY;
        for i in 0..=24 {
            let e = expected_marks(preset, raw(i as f64 * 0.5, 70.0));
            assert!(e >= prev);
            prev = e;
        }
    }

    #[test]
    fn blended_marks_monotone_in_study_hours_at_fixed_attendance() {
        // With a fixed regression score, the only hours dependence is the
        // heuristic term and the penalty, both monotone.
        let preset = &BALANCED;
        for attendance in [20.0, 39.0, 40.0, 75.0, 100.0] {
            let mut prev = f64::NEG_INFINITY;
            for i in 0..=24 {
                let b = blend(preset, raw(i as f64 * 0.5, attendance), 0.5, 0.5);
                assert!(
                    b.marks >= prev,
                    "marks decreased at hours={} attendance={attendance}",
                    i as f64 * 0.5
                );
                prev = b.marks;
            }
        }
    }

    #[test]
    fn effort_penalty_caps_marks_and_probability() {
        let preset = &BALANCED;
        let low_effort = [
            raw(2.9, 90.0),
            raw(0.0, 100.0),
            raw(8.0, 39.0),
            raw(1.0, 10.0),
        ];
        for r in low_effort {
            // Even a wildly optimistic model cannot beat the penalty.
            let b = blend(preset, r, 1.0, 0.99);
            assert!(b.penalized);
            assert!(b.marks <= 45.0, "marks {} above penalty cap", b.marks);
            assert!(b.pass_probability <= 0.30);
            assert!(b.classifier_prob <= 0.30);
            assert_eq!(b.verdict, Verdict::Fail);
        }
    }

    #[test]
    fn penalty_trigger_is_strict_less_than() {
        let preset = &BALANCED;
        // 3 hours / 40% are the minimums, not penalized themselves.
        let b = blend(preset, raw(3.0, 40.0), 0.5, 0.5);
        assert!(!b.penalized);
    }

    #[test]
    fn verdict_flips_exactly_at_the_pass_threshold() {
        let preset = &BALANCED;
        // expected = 10*3 + 0.5*40 = 50, model marks = 50
        // => blended = 0.6*50 + 0.4*50 = 50 exactly, no penalty.
        let b = blend(preset, raw(3.0, 40.0), 0.5, 0.5);
        assert_eq!(b.marks, preset.pass_threshold);
        assert_eq!(b.verdict, Verdict::Pass);
        assert_eq!(b.pass_probability, 0.5);

        // A hair under the threshold fails.
        let under = blend(preset, raw(3.0, 40.0), 0.4999, 0.5);
        assert!(under.marks < preset.pass_threshold);
        assert_eq!(under.verdict, Verdict::Fail);
        assert!(under.pass_probability < 0.5);
    }

    #[test]
    fn verdict_agrees_with_published_probability() {
        let preset = &BALANCED;
        for score in [0.0, 0.2, 0.45, 0.5, 0.55, 0.8, 1.0] {
            for h in [0.0, 2.0, 3.0, 5.0, 8.0, 12.0] {
                for a in [0.0, 39.0, 40.0, 60.0, 100.0] {
                    let b = blend(preset, raw(h, a), score, 0.5);
                    match b.verdict {
                        Verdict::Pass => assert!(b.pass_probability >= 0.5),
                        Verdict::Fail => assert!(b.pass_probability < 0.5),
                    }
                }
            }
        }
    }

    #[test]
    fn blend_is_deterministic_bitwise() {
        let preset = &CONSERVATIVE;
        let a = blend(preset, raw(7.3, 66.0), 0.612, 0.7);
        let b = blend(preset, raw(7.3, 66.0), 0.612, 0.7);
        assert_eq!(a.marks.to_bits(), b.marks.to_bits());
        assert_eq!(a.pass_probability.to_bits(), b.pass_probability.to_bits());
    }

    #[test]
    fn degenerate_model_values_clamp_to_boundaries() {
        let preset = &BALANCED;
        let b = blend(preset, raw(6.0, 80.0), f64::NAN, f64::NAN);
        assert_eq!(b.model_marks, 0.0);
        assert_eq!(b.classifier_prob, 0.0);
        assert!(b.marks >= preset.marks_floor && b.marks <= preset.marks_ceiling);
        assert!((0.0..=1.0).contains(&b.pass_probability));

        let inf = blend(preset, raw(6.0, 80.0), f64::INFINITY, 2.0);
        assert_eq!(inf.model_marks, 100.0);
        assert_eq!(inf.classifier_prob, 1.0);
        assert!(inf.marks <= preset.marks_ceiling);
    }

    #[test]
    fn zero_effort_lands_on_the_floor() {
        let preset = &BALANCED;
        let b = blend(preset, raw(0.0, 0.0), 0.0, 0.1);
        assert_eq!(b.marks, preset.marks_floor);
        assert_eq!(b.verdict, Verdict::Fail);
    }
}
