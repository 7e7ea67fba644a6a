use serde::{Deserialize, Serialize};

use crate::entities::{Appointment, Patient};

/// A referential-integrity failure recorded while writing appointments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteError {
    pub appointment_id: i64,
    pub patient_id: Option<i64>,
    pub message: String,
}

/// Structured outcome of one ingestion run.
///
/// `success` is false only when the run itself failed (unreadable input);
/// row-level problems are reported through the counters and `write_errors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub success: bool,
    pub message: String,
    /// Data rows read from the source (after header, excluding skipped rows).
    pub rows_read: usize,
    /// Rows skipped for structural reasons (column-count mismatch).
    pub rows_skipped: usize,
    /// Rows that could not contribute a patient for want of a dedup key.
    pub rows_without_patient_id: usize,
    /// The deduplicated patients created this run, in input order.
    pub patients: Vec<Patient>,
    /// The appointments persisted this run, in input order.
    pub appointments: Vec<Appointment>,
    /// Appointments rejected by the store at write time.
    pub write_errors: Vec<WriteError>,
}

impl IngestReport {
    pub fn patients_created(&self) -> usize {
        self.patients.len()
    }

    pub fn appointments_created(&self) -> usize {
        self.appointments.len()
    }

    pub fn has_write_errors(&self) -> bool {
        !self.write_errors.is_empty()
    }
}
