//! Attendance table loading.
//!
//! The input is a tab-separated table with one row per person. If the first
//! cell of the first row is not a plain number the first column is taken as
//! display names; otherwise people are auto-numbered `#1`, `#2`, ….
//! Malformed input fails here, descriptively, before any model is built.

use std::{fs, path::Path};

use anyhow::Context as _;
use quorum_model::{AttendanceMatrix, MatrixError};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("data file is empty")]
    Empty,
    #[display("line {line} has {len} fields, expected {expected}")]
    Inconsistent {
        line: usize,
        expected: usize,
        len: usize,
    },
    #[display("line {line}, field {field}: '{value}' is not an attendance code")]
    BadCode {
        line: usize,
        field: usize,
        value: String,
    },
    #[display("{_0}")]
    #[from]
    Matrix(MatrixError),
}

pub fn load_file(path: &Path) -> anyhow::Result<AttendanceMatrix> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    let matrix = parse_table(&text)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))?;
    Ok(matrix)
}

pub fn parse_table(text: &str) -> Result<AttendanceMatrix, LoadError> {
    let lines: Vec<Vec<&str>> = text
        .trim()
        .lines()
        .map(|line| line.split('\t').collect())
        .collect();

    let Some(first) = lines.first() else {
        return Err(LoadError::Empty);
    };
    let Some(&first_cell) = first.first() else {
        return Err(LoadError::Empty);
    };
    if first_cell.is_empty() {
        return Err(LoadError::Empty);
    }

    let expected = first.len();
    let have_names = !first_cell.chars().all(|c| c.is_ascii_digit());

    let mut names = Vec::with_capacity(lines.len());
    let mut codes = Vec::with_capacity(lines.len());
    for (index, row) in lines.iter().enumerate() {
        let line = index + 1;
        if row.len() != expected {
            return Err(LoadError::Inconsistent {
                line,
                expected,
                len: row.len(),
            });
        }
        let cells = if have_names {
            names.push(row[0].to_string());
            &row[1..]
        } else {
            names.push(format!("#{line}"));
            &row[..]
        };
        let row_codes = cells
            .iter()
            .enumerate()
            .map(|(field, cell)| {
                cell.parse::<u8>().map_err(|_| LoadError::BadCode {
                    line,
                    field: field + 1,
                    value: (*cell).to_string(),
                })
            })
            .collect::<Result<Vec<u8>, LoadError>>()?;
        codes.push(row_codes);
    }

    Ok(AttendanceMatrix::new(names, codes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_table_gets_numbered_names() {
        let matrix = parse_table("5\t0\n0\t5\n").unwrap();
        assert_eq!(matrix.names(), ["#1", "#2"]);
        assert_eq!(matrix.slot_count(), 2);
        assert_eq!(matrix.code(0, 0), 5);
        assert_eq!(matrix.code(1, 1), 5);
    }

    #[test]
    fn test_name_column_detected() {
        let matrix = parse_table("Ann\t5\t0\nBea\t0\t5\n").unwrap();
        assert_eq!(matrix.names(), ["Ann", "Bea"]);
        assert_eq!(matrix.slot_count(), 2);
        assert_eq!(matrix.code(0, 0), 5);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(parse_table(""), Err(LoadError::Empty)));
        assert!(matches!(parse_table("  \n "), Err(LoadError::Empty)));
    }

    #[test]
    fn test_inconsistent_rows_rejected() {
        let err = parse_table("1\t2\t3\n1\t2\n");
        assert!(matches!(
            err,
            Err(LoadError::Inconsistent {
                line: 2,
                expected: 3,
                len: 2
            })
        ));
    }

    #[test]
    fn test_bad_code_rejected() {
        let err = parse_table("Ann\t5\tx\n");
        assert!(matches!(
            err,
            Err(LoadError::BadCode { line: 1, field: 2, .. })
        ));
    }

    #[test]
    fn test_names_only_table_rejected() {
        // A name column with no code columns is an empty matrix
        assert!(matches!(
            parse_table("Ann\nBea\n"),
            Err(LoadError::Matrix(MatrixError::Empty))
        ));
    }
}
