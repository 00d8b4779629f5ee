//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and normalized input types (`RawInput`, `Features`)
//! - loaded model parameters (`ModelArtifacts` and friends)
//! - prediction outputs (`PredictionResult`, `Verdict`, `Tier`)

pub mod types;

pub use types::*;
