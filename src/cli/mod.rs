//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::PresetName;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gradecast", version, about = "Student pass/fail and exam marks predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one prediction and print the report (or JSON).
    Predict(PredictArgs),
    /// Launch the interactive dashboard.
    ///
    /// Renders the same pipeline as `gradecast predict`, with live input
    /// adjustment and a marks-vs-hours trend chart.
    Tui(TuiArgs),
    /// Train the model bundle from a CSV (or synthetic data) and write the
    /// artifact files.
    Train(TrainArgs),
}

/// Options for a one-shot prediction.
#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// Daily study hours (clamped to [0, 12]).
    #[arg(long)]
    pub hours: f64,

    /// Attendance percentage (clamped to [0, 100]).
    #[arg(long)]
    pub attendance: f64,

    /// Blending preset.
    #[arg(long, value_enum, default_value_t = PresetName::Balanced)]
    pub preset: PresetName,

    /// Directory holding the trained artifact files.
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// Emit the full result as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

/// Options for the dashboard.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Blending preset to start with.
    #[arg(long, value_enum, default_value_t = PresetName::Balanced)]
    pub preset: PresetName,

    /// Directory holding the trained artifact files.
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// Initial daily study hours.
    #[arg(long, default_value_t = 4.0)]
    pub hours: f64,

    /// Initial attendance percentage.
    #[arg(long, default_value_t = 40.0)]
    pub attendance: f64,
}

/// Options for training.
#[derive(Debug, Parser, Clone)]
pub struct TrainArgs {
    /// Training CSV (columns: StudyHours, Attendance, ResultNumeric). When
    /// omitted, a synthetic dataset is generated instead.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Number of synthetic samples to generate (ignored with --csv).
    #[arg(short = 'n', long, default_value_t = 200)]
    pub samples: usize,

    /// Random seed for synthetic data (ignored with --csv).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output directory for the artifact files.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}
