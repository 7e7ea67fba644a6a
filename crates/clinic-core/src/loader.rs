//! Deduplicating entity construction.
//!
//! Walks normalized rows in input order, building at most one patient per
//! distinct external `patient_id` (first occurrence wins, later duplicates
//! are ignored even when more complete) and one appointment per row that
//! carries an appointment identifier. Rows without a usable dedup key are
//! skipped for patient construction with a warning; their appointments are
//! still emitted and left for the sink to reject.

use std::collections::BTreeSet;

use tracing::warn;

use clinic_model::{Appointment, NormalizedRow, Patient};

/// Entities produced by one pass over the normalized rows.
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Deduplicated patients, in first-occurrence order.
    pub patients: Vec<Patient>,
    /// One appointment per row with an appointment identifier, in input order.
    pub appointments: Vec<Appointment>,
    /// Rows that could not contribute a patient for want of a `patient_id`.
    pub rows_without_patient_id: usize,
}

/// Builds the patient and appointment lists from normalized rows.
pub fn load_entities(rows: &[NormalizedRow]) -> LoadResult {
    let mut seen = BTreeSet::new();
    let mut result = LoadResult::default();
    for (index, row) in rows.iter().enumerate() {
        match row.patient_id {
            Some(patient_id) => {
                if seen.insert(patient_id) {
                    result.patients.push(patient_from_row(patient_id, row));
                }
            }
            None => {
                result.rows_without_patient_id += 1;
                warn!(
                    row = index + 1,
                    "row has no usable patient_id; skipping patient construction"
                );
            }
        }
        if let Some(appointment_id) = row.appointment_id {
            result.appointments.push(Appointment {
                appointment_id,
                appointment_date: row.appointment_date,
                appointment_type: row.appointment_type.clone(),
                patient_id: row.patient_id,
            });
        }
    }
    result
}

fn patient_from_row(patient_id: i64, row: &NormalizedRow) -> Patient {
    Patient {
        patient_id,
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        dob: row.dob,
        email: row.email.clone(),
        phone: row.phone.clone(),
        address: row.address.clone(),
    }
}
