//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a prediction run
//! - exported to JSON (`predict --json`, artifact files)
//! - reloaded later for inspection

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Raw user input, possibly out of range.
///
/// Out-of-range values are **clamped**, never rejected: the only hard input
/// error is a non-finite number, and that is caught at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub study_hours: f64,
    pub attendance_pct: f64,
}

impl RawInput {
    /// Practical upper bound for daily study hours.
    pub const STUDY_HOURS_MAX: f64 = 12.0;
    /// Attendance is a percentage.
    pub const ATTENDANCE_MAX: f64 = 100.0;

    /// Clamp both fields into their practical ranges.
    ///
    /// `study_hours = 20` is treated identically to `12`; `attendance = -5`
    /// identically to `0`.
    pub fn clamped(self) -> Self {
        Self {
            study_hours: self.study_hours.clamp(0.0, Self::STUDY_HOURS_MAX),
            attendance_pct: self.attendance_pct.clamp(0.0, Self::ATTENDANCE_MAX),
        }
    }

    pub fn is_finite(self) -> bool {
        self.study_hours.is_finite() && self.attendance_pct.is_finite()
    }
}

/// Normalized feature pair produced by the scaler.
///
/// No domain invariant beyond being finite (guaranteed by artifact validation
/// plus input clamping).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Features {
    pub z_hours: f64,
    pub z_attendance: f64,
}

/// Final pass/fail verdict.
///
/// Derived from blended marks, **not** directly from the classifier: see
/// `blend::blend` for the re-derivation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Big-letter label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
        }
    }
}

/// Named bucket derived from final marks, carrying a fixed display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    NeedsImprovement,
    AtRisk,
}

impl Tier {
    pub fn display_name(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent",
            Tier::Good => "Good",
            Tier::NeedsImprovement => "Needs Improvement",
            Tier::AtRisk => "At Risk",
        }
    }

    /// Fixed display color (CSS hex, as the dashboard renders it).
    pub fn color(self) -> &'static str {
        match self {
            Tier::Excellent => "#22C55E",
            Tier::Good => "#FACC15",
            Tier::NeedsImprovement => "#F97316",
            Tier::AtRisk => "#EF4444",
        }
    }

    /// Same color as an RGB triple (for terminal rendering).
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tier::Excellent => (0x22, 0xC5, 0x5E),
            Tier::Good => (0xFA, 0xCC, 0x15),
            Tier::NeedsImprovement => (0xF9, 0x73, 0x16),
            Tier::AtRisk => (0xEF, 0x44, 0x44),
        }
    }
}

/// Which blending preset to use.
///
/// Observed formula variants are configuration presets of one algorithm, not
/// separate code paths; the constants live in `blend::presets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    Balanced,
    Conservative,
    Optimistic,
}

impl PresetName {
    pub fn display_name(self) -> &'static str {
        match self {
            PresetName::Balanced => "balanced",
            PresetName::Conservative => "conservative",
            PresetName::Optimistic => "optimistic",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PresetName::Balanced => PresetName::Conservative,
            PresetName::Conservative => PresetName::Optimistic,
            PresetName::Optimistic => PresetName::Balanced,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PresetName::Balanced => PresetName::Optimistic,
            PresetName::Conservative => PresetName::Balanced,
            PresetName::Optimistic => PresetName::Conservative,
        }
    }
}

// Needed for clap's `default_value_t`.
impl std::fmt::Display for PresetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Axis a dynamic recommendation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceAxis {
    StudyHours,
    Attendance,
}

impl AdviceAxis {
    pub fn display_name(self) -> &'static str {
        match self {
            AdviceAxis::StudyHours => "study hours/day",
            AdviceAxis::Attendance => "attendance points",
        }
    }
}

/// Minimum additional effort needed to reach the next tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub axis: AdviceAxis,
    /// Additional units along `axis` (hours or attendance points).
    pub delta: f64,
    pub target_tier: Tier,
    /// False when the axis headroom alone cannot close the gap; `delta` is
    /// then the full remaining headroom.
    pub reaches_target: bool,
}

/// Stage-by-stage intermediate values, kept for reports and the dashboard.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Breakdown {
    /// Input after range clamping (the values the pipeline actually used).
    pub clamped: RawInput,
    pub z_hours: f64,
    pub z_attendance: f64,
    /// Raw regressor output (0-1 pass-fraction convention).
    pub regression_score: f64,
    /// Regressor output on the 0-100 marks scale.
    pub model_marks: f64,
    /// Hand-authored heuristic estimate from raw inputs alone.
    pub expected_marks: f64,
    /// Classifier probability (clamped, and capped when penalized). The
    /// published probability is re-derived from final marks instead.
    pub classifier_prob: f64,
    /// Whether the effort-penalty override fired.
    pub penalized: bool,
}

/// A full prediction, created fresh per request and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub pass_probability: f64,
    pub marks: f64,
    pub verdict: Verdict,
    pub tier: Tier,
    pub tier_color: &'static str,
    pub advisory_text: &'static str,
    pub recommendation: Option<Recommendation>,
    pub breakdown: Breakdown,
}

/// Per-feature affine transform learned offline (mean/scale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Means for [study_hours, attendance_pct].
    pub means: [f64; 2],
    /// Scales (standard deviations) for [study_hours, attendance_pct].
    pub scales: [f64; 2],
}

/// Linear model mapping normalized features to a 0-1 pass-fraction score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressorParams {
    /// Weights for [z_hours, z_attendance].
    pub weights: [f64; 2],
    pub bias: f64,
}

/// Logistic model over [z_hours, z_attendance, regression_score].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierParams {
    pub weights: [f64; 3],
    pub bias: f64,
}

/// Provenance recorded alongside each artifact file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub tool: String,
    pub trained_at: NaiveDate,
    pub n_samples: usize,
}

/// The full trained parameter bundle, loaded once at startup and treated as
/// read-only for the process lifetime. All three parts must load together;
/// partial availability is treated as unusable (see `io::artifacts`).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifacts {
    pub scaler: ScalerParams,
    pub regressor: RegressorParams,
    pub classifier: ClassifierParams,
    pub meta: ArtifactMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_saturating_not_rejecting() {
        let over = RawInput {
            study_hours: 20.0,
            attendance_pct: -5.0,
        }
        .clamped();
        assert_eq!(over.study_hours, 12.0);
        assert_eq!(over.attendance_pct, 0.0);

        let inside = RawInput {
            study_hours: 4.0,
            attendance_pct: 40.0,
        }
        .clamped();
        assert_eq!(inside.study_hours, 4.0);
        assert_eq!(inside.attendance_pct, 40.0);
    }

    #[test]
    fn non_finite_input_is_detected() {
        let bad = RawInput {
            study_hours: f64::NAN,
            attendance_pct: 50.0,
        };
        assert!(!bad.is_finite());
    }

    #[test]
    fn preset_cycle_round_trips() {
        let mut p = PresetName::Balanced;
        for _ in 0..3 {
            p = p.next();
        }
        assert_eq!(p, PresetName::Balanced);
        assert_eq!(PresetName::Balanced.prev().next(), PresetName::Balanced);
    }
}
