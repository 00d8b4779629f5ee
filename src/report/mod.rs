//! Terminal report formatting.
//!
//! Plain-text summaries for the `predict` and `train` subcommands. The TUI
//! renders the same data itself; these are for scripted / one-shot use.

use std::path::Path;

use crate::blend::BlendPreset;
use crate::domain::{ArtifactMeta, PredictionResult};
use crate::train::TrainSummary;

/// Format the full prediction summary (verdict + stage breakdown + advice).
pub fn format_prediction(
    result: &PredictionResult,
    preset: &BlendPreset,
    meta: &ArtifactMeta,
) -> String {
    let mut out = String::new();
    let b = &result.breakdown;

    out.push_str("=== gradecast - Student Result Prediction ===\n");
    out.push_str(&format!("Preset: {}\n", preset.name.display_name()));
    out.push_str(&format!(
        "Model: trained {} on n={} samples\n",
        meta.trained_at, meta.n_samples
    ));
    out.push_str(&format!(
        "Input: hours={:.2}/day | attendance={:.1}%\n",
        b.clamped.study_hours, b.clamped.attendance_pct
    ));

    out.push_str("\nPrediction:\n");
    out.push_str(&format!(
        "- Verdict: {} (p={:.1}%)\n",
        result.verdict.display_name(),
        result.pass_probability * 100.0
    ));
    out.push_str(&format!("- Marks: {:.1} / 100\n", result.marks));
    out.push_str(&format!(
        "- Tier: {} ({})\n",
        result.tier.display_name(),
        result.tier_color
    ));

    out.push_str("\nBreakdown:\n");
    out.push_str(&format!(
        "- features: z_hours={:+.3} z_attendance={:+.3}\n",
        b.z_hours, b.z_attendance
    ));
    out.push_str(&format!(
        "- model: score={:.4} -> marks={:.1}\n",
        b.regression_score, b.model_marks
    ));
    out.push_str(&format!("- heuristic: expected marks={:.1}\n", b.expected_marks));
    out.push_str(&format!("- classifier: p={:.3}\n", b.classifier_prob));
    if b.penalized {
        out.push_str(&format!(
            "- effort penalty applied (hours < {} or attendance < {})\n",
            preset.min_study_hours, preset.min_attendance_pct
        ));
    }

    out.push_str("\nAdvice:\n");
    out.push_str(&format!("- {}\n", result.advisory_text));
    if let Some(rec) = &result.recommendation {
        let qualifier = if rec.reaches_target {
            "to reach"
        } else {
            "toward"
        };
        out.push_str(&format!(
            "- Add {:.1} {} {qualifier} {}.\n",
            rec.delta,
            rec.axis.display_name(),
            rec.target_tier.display_name()
        ));
    }

    out
}

/// Format the training job summary.
pub fn format_train_summary(summary: &TrainSummary, meta: &ArtifactMeta, out_dir: &Path) -> String {
    let mut out = String::new();

    out.push_str("=== gradecast - Training ===\n");
    out.push_str(&format!(
        "Rows: n={} used | {} skipped\n",
        summary.n_rows, summary.n_skipped
    ));
    out.push_str(&format!(
        "Train accuracy: {:.1}%\n",
        summary.train_accuracy * 100.0
    ));
    out.push_str(&format!("Trained at: {}\n", meta.trained_at));
    out.push_str(&format!("Artifacts: {}\n", out_dir.display()));

    out
}
