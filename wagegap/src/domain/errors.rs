//! Structured error types for wagegap
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Dataset is not valid {0} text")]
    EncodingMismatch(&'static str),
}

#[derive(Error, Debug)]
pub enum CleaningError {
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema mismatch, missing columns: {}", .0.join(", "))]
    SchemaMismatch(Vec<String>),

    #[error("Cannot coerce age {value:?} on line {line} to a number")]
    AgeCoercion { line: u64, value: String },

    #[error("Cannot coerce {column} {value:?} on line {line} to a number")]
    NumericCoercion { column: &'static str, line: u64, value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid {role} field {value:?} (expected one of: {allowed})")]
    InvalidField { role: &'static str, value: String, allowed: String },
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Cleaning(#[from] CleaningError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_lists_columns() {
        let err = CleaningError::SchemaMismatch(vec!["prestg10".to_string(), "sei10".to_string()]);
        assert_eq!(err.to_string(), "Schema mismatch, missing columns: prestg10, sei10");
    }

    #[test]
    fn test_invalid_field_display() {
        let err = SelectionError::InvalidField {
            role: "x-axis",
            value: "income".to_string(),
            allowed: "satjob, relationship".to_string(),
        };
        assert!(err.to_string().contains("\"income\""));
        assert!(err.to_string().contains("satjob, relationship"));
    }

    #[test]
    fn test_dashboard_error_is_transparent() {
        let err: DashboardError = IngestError::HttpStatus {
            url: "http://localhost/gss.csv".to_string(),
            status: 404,
        }
        .into();
        assert_eq!(err.to_string(), "Fetching http://localhost/gss.csv returned HTTP 404");
    }
}
