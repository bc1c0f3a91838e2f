//! Solution export to JSON.
//!
//! The file is the portable form of a run: which method ran, on which input,
//! and the resulting vector keyed by column order. The schema is
//! `domain::SolutionReport`.

use std::fs::File;
use std::path::Path;

use crate::domain::SolutionReport;
use crate::error::AppError;

/// Write a solution report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &SolutionReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::input(format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

/// Read a previously exported solution report.
pub fn read_report_json(path: &Path) -> Result<SolutionReport, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open export '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid export JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn export_reads_back() {
        let report = SolutionReport {
            tool: "eqsolve".to_string(),
            generated_at: chrono::Utc::now(),
            method: "l1".to_string(),
            source: PathBuf::from("out.csv"),
            rows: 1,
            columns: vec!["a".to_string(), "b".to_string()],
            x: vec![-2.0, 2.0],
            verified: None,
            rank: None,
            residual_norm: None,
            status: Some("Solved".to_string()),
            objective_value: Some(0.0),
        };

        let path = std::env::temp_dir().join(format!("eqsolve_export_{}.json", std::process::id()));
        write_report_json(&path, &report).unwrap();
        let back = read_report_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back.columns, report.columns);
        assert_eq!(back.x, report.x);
        assert_eq!(back.status.as_deref(), Some("Solved"));
        assert!(back.verified.is_none());
    }
}
