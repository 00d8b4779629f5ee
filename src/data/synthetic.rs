//! Deterministic synthetic training data.
//!
//! Used when no real CSV is available: draws (hours, attendance) pairs over
//! the practical input ranges and labels them with the same marks heuristic
//! the blender trusts, plus normal "classroom noise" so the classes overlap
//! near the boundary.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::{Dataset, LabeledRow};
use crate::domain::RawInput;
use crate::error::AppError;

/// Marks per daily study hour (matches the blender's expected-marks prior).
const W_STUDY: f64 = 10.0;
/// Marks per attendance point.
const W_ATTENDANCE: f64 = 0.5;
/// Noise standard deviation in marks.
const NOISE_STD: f64 = 8.0;
/// Passing score for label generation.
const PASS_SCORE: f64 = 50.0;

/// Generate `count` labeled samples from `seed`. Same seed, same dataset.
pub fn generate_dataset(count: usize, seed: u64) -> Result<Dataset, AppError> {
    if count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, NOISE_STD)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let study_hours = rng.gen_range(0.0..=RawInput::STUDY_HOURS_MAX);
        // Very low attendance is rare in real cohorts; sample from 20 up.
        let attendance_pct = rng.gen_range(20.0..=RawInput::ATTENDANCE_MAX);

        let score = W_STUDY * study_hours + W_ATTENDANCE * attendance_pct + noise.sample(&mut rng);
        rows.push(LabeledRow {
            input: RawInput {
                study_hours,
                attendance_pct,
            },
            passed: score >= PASS_SCORE,
        });
    }

    Ok(Dataset {
        rows,
        skipped: Vec::new(),
    })
}
