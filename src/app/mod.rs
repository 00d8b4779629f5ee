//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads (or trains) the model artifact bundle
//! - runs the prediction pipeline
//! - prints reports or launches the dashboard

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, PredictArgs, TrainArgs};
use crate::domain::RawInput;
use crate::error::AppError;

pub mod pipeline;

/// Environment variable overriding the default model directory.
pub const MODEL_DIR_ENV: &str = "GRADECAST_MODEL_DIR";

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_MODEL_DIR: &str = "model";

/// Entry point for the `gradecast` binary.
pub fn run() -> Result<(), AppError> {
    // Optional .env file for GRADECAST_MODEL_DIR; absence is fine.
    dotenvy::dotenv().ok();

    // We want `gradecast` and `gradecast --preset optimistic` to behave like
    // `gradecast tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Tui(args) => crate::tui::run(args),
        Command::Train(args) => handle_train(args),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let model_dir = resolve_model_dir(args.model_dir.clone());
    let artifacts = crate::io::load_artifacts(&model_dir)?;
    let preset = args.preset.preset();

    let raw = RawInput {
        study_hours: args.hours,
        attendance_pct: args.attendance,
    };
    let result = pipeline::run_prediction(&artifacts, preset, raw)?;

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| AppError::new(4, format!("Failed to serialize result: {e}")))?;
        println!("{json}");
    } else {
        println!(
            "{}",
            crate::report::format_prediction(&result, preset, &artifacts.meta)
        );
    }

    Ok(())
}

fn handle_train(args: TrainArgs) -> Result<(), AppError> {
    let dataset = match &args.csv {
        Some(path) => crate::data::read_training_csv(path)?,
        None => crate::data::generate_dataset(args.samples, args.seed)?,
    };

    let (artifacts, summary) = crate::train::train(&dataset)?;

    let out_dir = args.out.unwrap_or_else(|| resolve_model_dir(None));
    crate::io::write_artifacts(&out_dir, &artifacts)?;

    println!(
        "{}",
        crate::report::format_train_summary(&summary, &artifacts.meta, &out_dir)
    );
    Ok(())
}

/// Model directory resolution: explicit flag, then environment, then default.
pub fn resolve_model_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(dir) = std::env::var(MODEL_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    PathBuf::from(DEFAULT_MODEL_DIR)
}

/// Rewrite argv so `gradecast` defaults to `gradecast tui`.
///
/// Rules:
/// - `gradecast`                        -> `gradecast tui`
/// - `gradecast --preset optimistic`    -> `gradecast tui --preset optimistic`
/// - `gradecast --help/--version/-h`    -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "tui" | "train");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
