//! Read/write model artifact files.
//!
//! The trained bundle is three JSON files in one directory:
//!
//! - `scaler.json`     — per-feature mean/scale
//! - `regressor.json`  — linear score model
//! - `classifier.json` — hybrid logistic model
//!
//! Each file carries the same provenance header (tool, trained-at date,
//! sample count). Loading is **all-or-nothing**: a missing or invalid file,
//! non-finite parameters, or mismatched provenance across the three files
//! makes the whole bundle unusable, so callers can never run a partially
//! loaded pipeline.

use std::fs::{File, create_dir_all};
use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{
    ArtifactMeta, ClassifierParams, ModelArtifacts, RegressorParams, ScalerParams,
};
use crate::error::AppError;

pub const SCALER_FILE: &str = "scaler.json";
pub const REGRESSOR_FILE: &str = "regressor.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

pub const TOOL_NAME: &str = "gradecast";

/// On-disk schema: provenance header + flattened parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArtifactFile<T> {
    tool: String,
    trained_at: NaiveDate,
    n_samples: usize,
    #[serde(flatten)]
    params: T,
}

/// Load and validate the full bundle from `dir`.
pub fn load_artifacts(dir: &Path) -> Result<ModelArtifacts, AppError> {
    let scaler: ArtifactFile<ScalerParams> = read_file(&dir.join(SCALER_FILE))?;
    let regressor: ArtifactFile<RegressorParams> = read_file(&dir.join(REGRESSOR_FILE))?;
    let classifier: ArtifactFile<ClassifierParams> = read_file(&dir.join(CLASSIFIER_FILE))?;

    for (name, file_meta) in [
        (SCALER_FILE, meta_of(&scaler)),
        (REGRESSOR_FILE, meta_of(&regressor)),
        (CLASSIFIER_FILE, meta_of(&classifier)),
    ] {
        if file_meta.tool != TOOL_NAME {
            return Err(AppError::new(
                2,
                format!("Artifact '{name}' was not produced by {TOOL_NAME}."),
            ));
        }
    }

    let meta = meta_of(&scaler);
    if meta_of(&regressor) != meta || meta_of(&classifier) != meta {
        return Err(AppError::new(
            2,
            "Artifact files disagree on provenance; retrain to get a consistent bundle.",
        ));
    }

    let artifacts = ModelArtifacts {
        scaler: scaler.params,
        regressor: regressor.params,
        classifier: classifier.params,
        meta,
    };
    validate(&artifacts)?;
    Ok(artifacts)
}

/// Write the full bundle into `dir` (created if missing).
pub fn write_artifacts(dir: &Path, artifacts: &ModelArtifacts) -> Result<(), AppError> {
    validate(artifacts)?;
    create_dir_all(dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create model directory '{}': {e}", dir.display()),
        )
    })?;

    write_file(&dir.join(SCALER_FILE), &artifacts.meta, &artifacts.scaler)?;
    write_file(
        &dir.join(REGRESSOR_FILE),
        &artifacts.meta,
        &artifacts.regressor,
    )?;
    write_file(
        &dir.join(CLASSIFIER_FILE),
        &artifacts.meta,
        &artifacts.classifier,
    )?;
    Ok(())
}

fn meta_of<T>(file: &ArtifactFile<T>) -> ArtifactMeta {
    ArtifactMeta {
        tool: file.tool.clone(),
        trained_at: file.trained_at,
        n_samples: file.n_samples,
    }
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<ArtifactFile<T>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!(
                "Model artifact '{}' is unavailable: {e}. Run `gradecast train` first.",
                path.display()
            ),
        )
    })?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid model artifact '{}': {e}", path.display())))
}

fn write_file<T: Serialize + Clone>(
    path: &Path,
    meta: &ArtifactMeta,
    params: &T,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create artifact '{}': {e}", path.display()))
    })?;
    let contents = ArtifactFile {
        tool: meta.tool.clone(),
        trained_at: meta.trained_at,
        n_samples: meta.n_samples,
        params: params.clone(),
    };
    serde_json::to_writer_pretty(file, &contents)
        .map_err(|e| AppError::new(2, format!("Failed to write artifact '{}': {e}", path.display())))
}

/// Reject bundles the pipeline cannot safely evaluate.
fn validate(artifacts: &ModelArtifacts) -> Result<(), AppError> {
    for (i, (&mean, &scale)) in artifacts
        .scaler
        .means
        .iter()
        .zip(artifacts.scaler.scales.iter())
        .enumerate()
    {
        if !mean.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return Err(AppError::new(
                2,
                format!("Scaler parameters for feature {i} are degenerate (mean={mean}, scale={scale})."),
            ));
        }
    }

    if !artifacts.regressor.bias.is_finite()
        || artifacts.regressor.weights.iter().any(|w| !w.is_finite())
    {
        return Err(AppError::new(2, "Regressor parameters are non-finite."));
    }

    if !artifacts.classifier.bias.is_finite()
        || artifacts.classifier.weights.iter().any(|w| !w.is_finite())
    {
        return Err(AppError::new(2, "Classifier parameters are non-finite."));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_artifacts() -> ModelArtifacts {
        ModelArtifacts {
            scaler: ScalerParams {
                means: [6.0, 50.0],
                scales: [3.0, 25.0],
            },
            regressor: RegressorParams {
                weights: [0.15, 0.20],
                bias: 0.5,
            },
            classifier: ClassifierParams {
                weights: [0.8, 0.6, 1.5],
                bias: 0.2,
            },
            meta: ArtifactMeta {
                tool: TOOL_NAME.to_string(),
                trained_at: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                n_samples: 200,
            },
        }
    }

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("gradecast-test-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn bundle_round_trips() {
        let dir = temp_dir("roundtrip");
        let original = sample_artifacts();
        write_artifacts(&dir, &original).unwrap();
        let loaded = load_artifacts(&dir).unwrap();
        assert_eq!(loaded, original);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_makes_the_whole_bundle_unusable() {
        let dir = temp_dir("partial");
        write_artifacts(&dir, &sample_artifacts()).unwrap();
        std::fs::remove_file(dir.join(CLASSIFIER_FILE)).unwrap();

        let err = load_artifacts(&dir).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(CLASSIFIER_FILE));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn mismatched_provenance_is_rejected() {
        let dir = temp_dir("mismatch");
        write_artifacts(&dir, &sample_artifacts()).unwrap();

        // Rewrite one file with a different sample count.
        let mut other = sample_artifacts();
        other.meta.n_samples = 999;
        write_file(&dir.join(REGRESSOR_FILE), &other.meta, &other.regressor).unwrap();

        let err = load_artifacts(&dir).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn degenerate_scale_is_rejected_on_write_and_load() {
        let mut bad = sample_artifacts();
        bad.scaler.scales[1] = 0.0;
        let err = write_artifacts(&temp_dir("degenerate"), &bad).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
