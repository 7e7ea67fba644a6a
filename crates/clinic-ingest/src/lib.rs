#![deny(unsafe_code)]

//! Ingestion of delimited patient/appointment source files.

pub mod csv_rows;

pub use csv_rows::{RowSet, read_rows, read_rows_from_path};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("open input {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("parse csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("input has no header row")]
    MissingHeader,
    #[error("header is missing the required patient_id column")]
    MissingPatientIdColumn,
}

pub type Result<T> = std::result::Result<T, IngestError>;
