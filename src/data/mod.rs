//! Training data: CSV ingest and synthetic sample generation.
//!
//! Both sources produce the same `Dataset` shape so the trainer does not
//! care where rows came from.

pub mod dataset;
pub mod synthetic;

pub use dataset::*;
pub use synthetic::*;
