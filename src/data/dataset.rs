//! Training CSV ingest and validation.
//!
//! Expected schema (header names matched case-insensitively):
//!
//! ```text
//! StudyHours,Attendance,ResultNumeric
//! 4.0,70,1
//! ```
//!
//! Design goals:
//! - strict schema for required columns (clear errors + exit code 2)
//! - row-level validation: skip bad rows, but report what happened
//! - deterministic behavior (no hidden randomness)

use std::path::Path;

use csv::StringRecord;

use crate::domain::RawInput;
use crate::error::AppError;

/// One usable training observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledRow {
    pub input: RawInput,
    pub passed: bool,
}

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Rows accepted for training, plus what was skipped and why.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rows: Vec<LabeledRow>,
    pub skipped: Vec<RowError>,
}

const COL_STUDY_HOURS: &str = "studyhours";
const COL_ATTENDANCE: &str = "attendance";
const COL_RESULT: &str = "resultnumeric";

/// Read a training CSV. Missing required columns are a hard error; bad rows
/// are skipped and reported via `Dataset::skipped`.
pub fn read_training_csv(path: &Path) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| {
            AppError::new(2, format!("Failed to open training CSV '{}': {e}", path.display()))
        })?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV header: {e}")))?
        .clone();

    let idx_hours = find_column(&headers, COL_STUDY_HOURS, path)?;
    let idx_attendance = find_column(&headers, COL_ATTENDANCE, path)?;
    let idx_result = find_column(&headers, COL_RESULT, path)?;

    let mut dataset = Dataset::default();

    for (i, record) in reader.records().enumerate() {
        // Header occupies line 1.
        let line = i + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                dataset.skipped.push(RowError {
                    line,
                    message: format!("unreadable row: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, idx_hours, idx_attendance, idx_result) {
            Ok(row) => dataset.rows.push(row),
            Err(message) => dataset.skipped.push(RowError { line, message }),
        }
    }

    Ok(dataset)
}

fn find_column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize, AppError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            AppError::new(
                2,
                format!(
                    "Training CSV '{}' is missing required column '{name}'.",
                    path.display()
                ),
            )
        })
}

fn parse_row(
    record: &StringRecord,
    idx_hours: usize,
    idx_attendance: usize,
    idx_result: usize,
) -> Result<LabeledRow, String> {
    let study_hours = parse_f64(record, idx_hours, "study hours")?;
    let attendance_pct = parse_f64(record, idx_attendance, "attendance")?;
    let label = parse_f64(record, idx_result, "result")?;

    let passed = if label == 0.0 {
        false
    } else if label == 1.0 {
        true
    } else {
        return Err(format!("result must be 0 or 1, got {label}"));
    };

    // Out-of-range values are clamped, matching the prediction boundary.
    let input = RawInput {
        study_hours,
        attendance_pct,
    }
    .clamped();

    Ok(LabeledRow { input, passed })
}

fn parse_f64(record: &StringRecord, idx: usize, what: &str) -> Result<f64, String> {
    let field = record.get(idx).ok_or_else(|| format!("missing {what}"))?;
    let value: f64 = field
        .parse()
        .map_err(|_| format!("{what} '{field}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("{what} '{field}' is not finite"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(tag: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "gradecast-csv-{tag}-{}.csv",
            std::process::id()
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_valid_rows_and_skips_bad_ones() {
        let path = write_temp_csv(
            "mixed",
            "StudyHours,Attendance,ResultNumeric\n\
             4.0,70,1\n\
             oops,50,0\n\
             2.0,30,0\n\
             6.0,80,2\n",
        );

        let dataset = read_training_csv(&path).unwrap();
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.skipped.len(), 2);
        assert_eq!(dataset.skipped[0].line, 3);
        assert!(dataset.rows[0].passed);
        assert!(!dataset.rows[1].passed);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn out_of_range_rows_are_clamped_not_skipped() {
        let path = write_temp_csv(
            "clamp",
            "studyhours,attendance,resultnumeric\n20,-5,1\n",
        );
        let dataset = read_training_csv(&path).unwrap();
        assert_eq!(dataset.rows.len(), 1);
        assert_eq!(dataset.rows[0].input.study_hours, 12.0);
        assert_eq!(dataset.rows[0].input.attendance_pct, 0.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_column_is_a_hard_error() {
        let path = write_temp_csv("missing", "StudyHours,ResultNumeric\n4,1\n");
        let err = read_training_csv(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("attendance"));
        let _ = std::fs::remove_file(&path);
    }
}
