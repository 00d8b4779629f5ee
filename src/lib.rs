//! `gradecast` library crate.
//!
//! The binary (`gradecast`) is a thin wrapper around this library so that:
//!
//! - the prediction pipeline is testable without spawning processes
//! - modules are reusable (e.g., future GUI/daemon front-ends)
//! - code stays easy to navigate as the project grows

pub mod advice;
pub mod app;
pub mod blend;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod model;
pub mod report;
pub mod train;
pub mod tui;
