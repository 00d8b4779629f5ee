//! Input/output helpers.
//!
//! - model artifact read/write (`artifacts`)
//!
//! Training CSV ingest lives in `data::dataset` next to the synthetic
//! generator, since both produce the same `Dataset` shape.

pub mod artifacts;

pub use artifacts::*;
