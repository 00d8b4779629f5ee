//! Trained pipeline stages.
//!
//! Each stage is a pure function over loaded, immutable parameters:
//!
//! - `normalize`: fixed affine transform of the raw inputs
//! - `regress`: linear score from the normalized features
//! - `classify`: logistic pass probability from features + score
//!
//! None of these interpret or bound the final result; that is the blender's
//! job (`blend::blend`).

pub mod classifier;
pub mod normalizer;
pub mod regressor;

pub use classifier::*;
pub use normalizer::*;
pub use regressor::*;
