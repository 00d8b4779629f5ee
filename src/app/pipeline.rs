//! Prediction orchestration: one pure function from (artifacts, preset,
//! input) to a full `PredictionResult`.
//!
//! Stage order is fixed: validate -> clamp -> normalize -> regress ->
//! classify -> blend -> tier/advice. Every stage is pure, so a prediction is
//! fully reproducible from its inputs.

use crate::advice::{map_tier, recommend};
use crate::blend::{BlendPreset, blend};
use crate::domain::{Breakdown, ModelArtifacts, PredictionResult, RawInput};
use crate::error::AppError;
use crate::model::{classify, normalize, regress};

/// Run the full pipeline for one input.
///
/// The only input rejection is a non-finite number; out-of-range values are
/// clamped instead.
pub fn run_prediction(
    artifacts: &ModelArtifacts,
    preset: &BlendPreset,
    raw: RawInput,
) -> Result<PredictionResult, AppError> {
    if !raw.is_finite() {
        return Err(AppError::new(
            2,
            format!(
                "Inputs must be finite numbers (got hours={}, attendance={}).",
                raw.study_hours, raw.attendance_pct
            ),
        ));
    }

    let clamped = raw.clamped();
    let features = normalize(&artifacts.scaler, clamped);
    let score = regress(&artifacts.regressor, features);
    let classifier_prob = classify(&artifacts.classifier, features, score);
    let blended = blend(preset, clamped, score, classifier_prob);
    let tier_info = map_tier(preset, blended.marks);
    let recommendation = recommend(preset, clamped, blended.marks, tier_info.tier);

    Ok(PredictionResult {
        pass_probability: blended.pass_probability,
        marks: blended.marks,
        verdict: blended.verdict,
        tier: tier_info.tier,
        tier_color: tier_info.color,
        advisory_text: tier_info.advice,
        recommendation,
        breakdown: Breakdown {
            clamped,
            z_hours: features.z_hours,
            z_attendance: features.z_attendance,
            regression_score: score,
            model_marks: blended.model_marks,
            expected_marks: blended.expected_marks,
            classifier_prob: blended.classifier_prob,
            penalized: blended.penalized,
        },
    })
}

/// Marks-vs-study-hours curve at fixed attendance, for the dashboard chart.
///
/// Samples `n` points on the full hours range. Inputs that fail the pipeline
/// cannot occur here (the grid is finite by construction), so the curve is
/// always complete.
pub fn build_trend(
    artifacts: &ModelArtifacts,
    preset: &BlendPreset,
    attendance_pct: f64,
    n: usize,
) -> Vec<(f64, f64)> {
    if n < 2 {
        return Vec::new();
    }

    let attendance_pct = attendance_pct.clamp(0.0, RawInput::ATTENDANCE_MAX);
    let step = RawInput::STUDY_HOURS_MAX / (n - 1) as f64;

    (0..n)
        .map(|i| {
            let hours = (i as f64 * step).min(RawInput::STUDY_HOURS_MAX);
            let raw = RawInput {
                study_hours: hours,
                attendance_pct,
            };
            let features = normalize(&artifacts.scaler, raw);
            let score = regress(&artifacts.regressor, features);
            let prob = classify(&artifacts.classifier, features, score);
            let blended = blend(preset, raw, score, prob);
            (hours, blended.marks)
        })
        .collect()
}
