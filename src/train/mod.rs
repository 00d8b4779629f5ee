//! Offline training job.
//!
//! Fits the three-stage parameter bundle from a labeled dataset:
//!
//! 1. scaler: per-feature mean and population standard deviation
//! 2. regressor: least squares on normalized features against the 0/1 pass
//!    label (so the score reads as a pass fraction)
//! 3. classifier: logistic regression on [features ++ regression score]
//!
//! Training is deterministic given the dataset.

use chrono::Local;
use nalgebra::{DMatrix, DVector};

use crate::data::Dataset;
use crate::domain::{
    ArtifactMeta, ClassifierParams, Features, ModelArtifacts, RegressorParams, ScalerParams,
};
use crate::error::AppError;
use crate::io::TOOL_NAME;
use crate::math::{fit_logistic, solve_least_squares};

/// Fewer rows than this cannot support the three-stage fit.
pub const MIN_TRAIN_ROWS: usize = 10;

/// IRLS iteration cap; the classifier converges in well under this on any
/// non-degenerate dataset.
const IRLS_MAX_ITERS: usize = 25;

/// A scale this small means the feature is effectively constant.
const MIN_FEATURE_STD: f64 = 1e-9;

/// What the trainer reports back to the CLI.
#[derive(Debug, Clone, Copy)]
pub struct TrainSummary {
    pub n_rows: usize,
    pub n_skipped: usize,
    /// Fraction of training rows the classifier labels correctly at 0.5.
    pub train_accuracy: f64,
}

/// Fit the full bundle. Fails with exit code 3 when the dataset cannot
/// support a fit (too small, single-class, or a constant feature).
pub fn train(dataset: &Dataset) -> Result<(ModelArtifacts, TrainSummary), AppError> {
    let rows = &dataset.rows;
    let n = rows.len();
    if n < MIN_TRAIN_ROWS {
        return Err(AppError::new(
            3,
            format!("Need at least {MIN_TRAIN_ROWS} usable rows to train, got {n}."),
        ));
    }
    if !rows.iter().any(|r| r.passed) || rows.iter().all(|r| r.passed) {
        return Err(AppError::new(
            3,
            "Training data contains a single class; both pass and fail rows are required.",
        ));
    }

    // Inputs are clamped at ingest, but re-clamp so the scaler never sees a
    // value the prediction path could not produce.
    let inputs: Vec<_> = rows.iter().map(|r| r.input.clamped()).collect();
    let labels: Vec<f64> = rows.iter().map(|r| f64::from(u8::from(r.passed))).collect();

    let scaler = fit_scaler(
        &inputs.iter().map(|i| i.study_hours).collect::<Vec<_>>(),
        &inputs.iter().map(|i| i.attendance_pct).collect::<Vec<_>>(),
    )?;

    let features: Vec<Features> = inputs
        .iter()
        .map(|&raw| crate::model::normalize(&scaler, raw))
        .collect();

    let regressor = fit_regressor(&features, &labels)?;
    let scores: Vec<f64> = features
        .iter()
        .map(|&f| crate::model::regress(&regressor, f))
        .collect();

    let classifier = fit_classifier(&features, &scores, &labels)?;

    let mut correct = 0usize;
    for ((&f, &s), &y) in features.iter().zip(scores.iter()).zip(labels.iter()) {
        let p = crate::model::classify(&classifier, f, s);
        if (p >= 0.5) == (y >= 0.5) {
            correct += 1;
        }
    }

    let artifacts = ModelArtifacts {
        scaler,
        regressor,
        classifier,
        meta: ArtifactMeta {
            tool: TOOL_NAME.to_string(),
            trained_at: Local::now().date_naive(),
            n_samples: n,
        },
    };

    let summary = TrainSummary {
        n_rows: n,
        n_skipped: dataset.skipped.len(),
        train_accuracy: correct as f64 / n as f64,
    };
    Ok((artifacts, summary))
}

fn fit_scaler(hours: &[f64], attendance: &[f64]) -> Result<ScalerParams, AppError> {
    let (mean_h, std_h) = mean_std(hours);
    let (mean_a, std_a) = mean_std(attendance);

    for (name, std) in [("study hours", std_h), ("attendance", std_a)] {
        if std < MIN_FEATURE_STD {
            return Err(AppError::new(
                3,
                format!("Feature '{name}' is constant across the dataset; cannot normalize."),
            ));
        }
    }

    Ok(ScalerParams {
        means: [mean_h, mean_a],
        scales: [std_h, std_a],
    })
}

/// Population mean and standard deviation.
fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

fn fit_regressor(features: &[Features], labels: &[f64]) -> Result<RegressorParams, AppError> {
    let n = features.len();
    let x = DMatrix::from_fn(n, 3, |i, j| match j {
        0 => 1.0,
        1 => features[i].z_hours,
        _ => features[i].z_attendance,
    });
    let y = DVector::from_column_slice(labels);

    let beta = solve_least_squares(&x, &y)
        .ok_or_else(|| AppError::new(3, "Regressor fit failed; data is too degenerate."))?;

    Ok(RegressorParams {
        weights: [beta[1], beta[2]],
        bias: beta[0],
    })
}

fn fit_classifier(
    features: &[Features],
    scores: &[f64],
    labels: &[f64],
) -> Result<ClassifierParams, AppError> {
    let n = features.len();
    let x = DMatrix::from_fn(n, 4, |i, j| match j {
        0 => 1.0,
        1 => features[i].z_hours,
        2 => features[i].z_attendance,
        _ => scores[i],
    });
    let y = DVector::from_column_slice(labels);

    let beta = fit_logistic(&x, &y, IRLS_MAX_ITERS)
        .ok_or_else(|| AppError::new(3, "Classifier fit failed; data is too degenerate."))?;

    Ok(ClassifierParams {
        weights: [beta[1], beta[2], beta[3]],
        bias: beta[0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{LabeledRow, generate_dataset};
    use crate::domain::RawInput;
    use crate::model::{classify, normalize, regress};

    fn trained() -> (ModelArtifacts, TrainSummary) {
        let dataset = generate_dataset(200, 42).unwrap();
        train(&dataset).unwrap()
    }

    #[test]
    fn training_fits_a_sane_bundle() {
        let (artifacts, summary) = trained();

        assert_eq!(summary.n_rows, 200);
        assert_eq!(artifacts.meta.n_samples, 200);
        assert_eq!(artifacts.meta.tool, TOOL_NAME);

        assert!(artifacts.scaler.scales.iter().all(|&s| s > 0.0));
        // Both features push toward passing, so both weights come out positive.
        assert!(artifacts.regressor.weights[0] > 0.0);
        assert!(artifacts.regressor.weights[1] > 0.0);
        assert!(summary.train_accuracy >= 0.8);
    }

    #[test]
    fn trained_model_separates_clear_cases() {
        let (artifacts, _) = trained();

        let strong = normalize(
            &artifacts.scaler,
            RawInput {
                study_hours: 10.0,
                attendance_pct: 90.0,
            },
        );
        let weak = normalize(
            &artifacts.scaler,
            RawInput {
                study_hours: 1.0,
                attendance_pct: 25.0,
            },
        );

        let score_strong = regress(&artifacts.regressor, strong);
        let score_weak = regress(&artifacts.regressor, weak);
        assert!(score_strong > score_weak);
        assert!(score_strong > 0.5);

        let p_strong = classify(&artifacts.classifier, strong, score_strong);
        let p_weak = classify(&artifacts.classifier, weak, score_weak);
        assert!(p_strong > 0.8);
        assert!(p_weak < 0.3);
    }

    #[test]
    fn too_few_rows_is_rejected() {
        let dataset = generate_dataset(5, 1).unwrap();
        let err = train(&dataset).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn single_class_is_rejected() {
        let rows = (0..20)
            .map(|i| LabeledRow {
                input: RawInput {
                    study_hours: f64::from(i) * 0.5,
                    attendance_pct: 50.0 + f64::from(i),
                },
                passed: true,
            })
            .collect();
        let dataset = Dataset {
            rows,
            skipped: Vec::new(),
        };
        let err = train(&dataset).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn constant_feature_is_rejected() {
        let rows = (0..20)
            .map(|i| LabeledRow {
                input: RawInput {
                    study_hours: 6.0,
                    attendance_pct: 30.0 + f64::from(i) * 3.0,
                },
                passed: i >= 10,
            })
            .collect();
        let dataset = Dataset {
            rows,
            skipped: Vec::new(),
        };
        let err = train(&dataset).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("study hours"));
    }
}
