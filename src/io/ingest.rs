//! CSV ingest.
//!
//! Turns a coefficient table into a `LinearSystem`:
//! - every column except the target becomes a column of `A`, in file order
//! - the target column (`equals` by default) becomes `b`
//!
//! Unlike a tolerant data import, a single bad row fails the whole load: a
//! system with a dropped equation is a different system.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use nalgebra::{DMatrix, DVector};

use crate::domain::LinearSystem;
use crate::error::AppError;

/// Open `path`, parse it, and close it before returning.
pub fn load_system(path: &Path, target: &str) -> Result<LinearSystem, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    read_system(file, target)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {}", path.display(), e.message())))
}

/// Parse a system from any reader.
pub fn read_system<R: Read>(reader: R, target: &str) -> Result<LinearSystem, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let target_idx = find_target_column(&headers, target)?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != target_idx)
        .map(|(_, name)| normalize_header_name(name).to_string())
        .collect();

    if columns.is_empty() {
        return Err(AppError::input(format!(
            "CSV has no coefficient columns besides `{target}`."
        )));
    }

    let n = columns.len();
    let mut coefficients: Vec<f64> = Vec::new();
    let mut rhs: Vec<f64> = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: 1-based lines, and the header occupies line 1.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::input(format!("CSV parse error on line {line}: {e}")))?;

        let mut row = Vec::with_capacity(n);
        for (col, field) in record.iter().enumerate() {
            let value = parse_field(field)
                .map_err(|msg| AppError::input(format!("Line {line}, column `{}`: {msg}", &headers[col])))?;
            if col == target_idx {
                rhs.push(value);
            } else {
                row.push(value);
            }
        }
        coefficients.extend(row);
    }

    let m = rhs.len();
    if m == 0 {
        return Err(AppError::input("CSV contains a header but no equations."));
    }

    Ok(LinearSystem {
        a: DMatrix::from_row_slice(m, n, &coefficients),
        b: DVector::from_vec(rhs),
        columns,
    })
}

fn find_target_column(headers: &StringRecord, target: &str) -> Result<usize, AppError> {
    headers
        .iter()
        .position(|name| normalize_header_name(name) == target)
        .ok_or_else(|| AppError::input(format!("Missing required column: `{target}`")))
}

fn normalize_header_name(name: &str) -> &str {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    name.trim().trim_start_matches('\u{feff}')
}

fn parse_field(field: &str) -> Result<f64, String> {
    let value: f64 = field
        .parse()
        .map_err(|_| format!("`{field}` is not a number."))?;
    if !value.is_finite() {
        return Err(format!("`{field}` is not finite."));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_target_from_coefficients_in_file_order() {
        let csv = "a.sm,equals,b.sm\n1,3,2\n4,6,5\n";
        let sys = read_system(csv.as_bytes(), "equals").unwrap();

        assert_eq!(sys.columns, vec!["a.sm", "b.sm"]);
        assert_eq!(sys.a, DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 4.0, 5.0]));
        assert_eq!(sys.b, DVector::from_vec(vec![3.0, 6.0]));
    }

    #[test]
    fn strips_bom_and_whitespace_from_headers() {
        let csv = "\u{feff}x , equals\n2.5, -1e-3\n";
        let sys = read_system(csv.as_bytes(), "equals").unwrap();
        assert_eq!(sys.columns, vec!["x"]);
        assert_eq!(sys.b[0], -1e-3);
    }

    #[test]
    fn missing_target_column_is_input_error() {
        let err = read_system("x,y\n1,2\n".as_bytes(), "equals").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.to_string().contains("`equals`"));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let err = read_system("x,y,equals\n1,2,3\n1,2\n".as_bytes(), "equals").unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn non_numeric_field_names_line_and_column() {
        let err = read_system("x,equals\n1,2\nfoo,3\n".as_bytes(), "equals").unwrap_err();
        assert_eq!(err.to_string(), "Line 3, column `x`: `foo` is not a number.");
    }

    #[test]
    fn header_only_file_is_rejected() {
        assert!(read_system("x,equals\n".as_bytes(), "equals").is_err());
    }

    #[test]
    fn target_only_file_is_rejected() {
        assert!(read_system("equals\n1\n".as_bytes(), "equals").is_err());
    }

    #[test]
    fn custom_target_column() {
        let sys = read_system("rhs,x\n4,2\n".as_bytes(), "rhs").unwrap();
        assert_eq!(sys.columns, vec!["x"]);
        assert_eq!(sys.b[0], 4.0);
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = load_system(Path::new("definitely/not/here.csv"), "equals").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
