//! Dynamic recommendation: the minimum extra effort to reach the next tier.
//!
//! The delta is solved through the expected-marks term of the blender (the
//! only input-linear part of the policy), using the same fixed weights, at an
//! effective rate of `(1 - alpha) * w_axis` marks per unit. We recommend
//! along whichever axis is currently under-utilized relative to the other
//! (`hours / 12` vs `attendance / 100`), falling back to the other axis when
//! the preferred one has no headroom left.

use crate::advice::{EXCELLENT_MIN, GOOD_MIN};
use crate::blend::BlendPreset;
use crate::domain::{AdviceAxis, RawInput, Recommendation, Tier};

/// Compute a recommendation for climbing out of `tier`, or `None` when
/// already Excellent, the gap is already closed, or no headroom remains.
///
/// `raw` must already be clamped.
pub fn recommend(
    preset: &BlendPreset,
    raw: RawInput,
    marks: f64,
    tier: Tier,
) -> Option<Recommendation> {
    let (target_tier, target_min) = match tier {
        Tier::Excellent => return None,
        Tier::Good => (Tier::Excellent, EXCELLENT_MIN),
        Tier::NeedsImprovement => (Tier::Good, GOOD_MIN),
        Tier::AtRisk => (Tier::NeedsImprovement, preset.pass_threshold),
    };

    let gap = target_min - marks;
    if gap <= 0.0 {
        return None;
    }

    let hours_util = raw.study_hours / RawInput::STUDY_HOURS_MAX;
    let attendance_util = raw.attendance_pct / RawInput::ATTENDANCE_MAX;

    let preferred = if hours_util <= attendance_util {
        AdviceAxis::StudyHours
    } else {
        AdviceAxis::Attendance
    };

    axis_delta(preset, raw, gap, preferred, target_tier)
        .or_else(|| axis_delta(preset, raw, gap, other(preferred), target_tier))
}

fn other(axis: AdviceAxis) -> AdviceAxis {
    match axis {
        AdviceAxis::StudyHours => AdviceAxis::Attendance,
        AdviceAxis::Attendance => AdviceAxis::StudyHours,
    }
}

fn axis_delta(
    preset: &BlendPreset,
    raw: RawInput,
    gap: f64,
    axis: AdviceAxis,
    target_tier: Tier,
) -> Option<Recommendation> {
    let (weight, headroom) = match axis {
        AdviceAxis::StudyHours => (
            preset.w_study,
            RawInput::STUDY_HOURS_MAX - raw.study_hours,
        ),
        AdviceAxis::Attendance => (
            preset.w_attendance,
            RawInput::ATTENDANCE_MAX - raw.attendance_pct,
        ),
    };

    let effective = (1.0 - preset.alpha) * weight;
    if effective <= 0.0 || headroom <= 0.0 {
        return None;
    }

    let needed = gap / effective;
    if needed <= headroom {
        Some(Recommendation {
            axis,
            delta: needed,
            target_tier,
            reaches_target: true,
        })
    } else {
        Some(Recommendation {
            axis,
            delta: headroom,
            target_tier,
            reaches_target: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::BALANCED;

    fn raw(study_hours: f64, attendance_pct: f64) -> RawInput {
        RawInput {
            study_hours,
            attendance_pct,
        }
    }

    #[test]
    fn recommends_under_utilized_axis() {
        // 5h/12 is less utilized than 80/100, so study hours are recommended.
        // gap = 65 - 55 = 10, effective = 0.4 * 10 = 4 marks/hour => 2.5h.
        let rec = recommend(&BALANCED, raw(5.0, 80.0), 55.0, Tier::NeedsImprovement).unwrap();
        assert_eq!(rec.axis, AdviceAxis::StudyHours);
        assert!((rec.delta - 2.5).abs() < 1e-9);
        assert_eq!(rec.target_tier, Tier::Good);
        assert!(rec.reaches_target);
    }

    #[test]
    fn falls_back_to_headroom_when_axis_cannot_close_gap() {
        // Attendance is the under-utilized axis, but 0.4 * 0.5 = 0.2
        // marks/point cannot deliver 20 marks within 50 points of headroom.
        let rec = recommend(&BALANCED, raw(11.5, 50.0), 65.0, Tier::Good).unwrap();
        assert_eq!(rec.axis, AdviceAxis::Attendance);
        assert_eq!(rec.delta, 50.0);
        assert!(!rec.reaches_target);
    }

    #[test]
    fn at_risk_targets_the_pass_threshold() {
        let rec = recommend(&BALANCED, raw(2.0, 100.0), 45.0, Tier::AtRisk).unwrap();
        assert_eq!(rec.target_tier, Tier::NeedsImprovement);
        assert_eq!(rec.axis, AdviceAxis::StudyHours);
        // gap = 50 - 45 = 5 => 5 / 4 = 1.25 extra hours.
        assert!((rec.delta - 1.25).abs() < 1e-9);
        assert!(rec.reaches_target);
    }

    #[test]
    fn excellent_and_exhausted_inputs_yield_nothing() {
        assert!(recommend(&BALANCED, raw(6.0, 80.0), 90.0, Tier::Excellent).is_none());
        assert!(recommend(&BALANCED, raw(12.0, 100.0), 70.0, Tier::Good).is_none());
    }
}
