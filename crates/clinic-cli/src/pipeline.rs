//! End-to-end ingestion pipeline.
//!
//! Reads raw rows from a CSV source, normalizes and validates them, splits
//! them into deduplicated patients and their appointments, and writes the
//! result through a [`RecordStore`] in a single transaction.

use std::path::PathBuf;

use anyhow::Context;
use clinic_core::{load_entities, normalize_rows};
use clinic_ingest::{RowSet, read_rows, read_rows_from_path};
use clinic_model::{IngestReport, WriteError};
use clinic_store::{RecordStore, StoreError};
use tracing::{debug, info, trace, warn};

use crate::logging::redact_value;

/// Bundled sample export used by `ingest --demo`.
pub const DEMO_DATA: &str = include_str!("../data/patients_and_appointments.txt");

/// Where the pipeline reads raw rows from.
#[derive(Debug, Clone)]
pub enum IngestSource {
    /// A CSV file on disk.
    Path(PathBuf),
    /// The bundled demo export.
    Demo,
}

impl IngestSource {
    fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Demo => "bundled demo data".to_string(),
        }
    }
}

/// Run the full ingestion pipeline against the given store.
///
/// All writes happen inside one transaction: nothing is visible to readers
/// until the final commit. Appointments that reference a patient id missing
/// from the file are rejected by the store and recorded as write errors
/// rather than aborting the run.
///
/// # Errors
///
/// Returns an error when the source cannot be read, the header is unusable,
/// or the store fails for a reason other than an unknown patient reference.
pub fn run_ingest(
    source: &IngestSource,
    store: &mut dyn RecordStore,
) -> anyhow::Result<IngestReport> {
    info!(source = %source.describe(), "starting ingestion");

    let RowSet { rows, skipped } = match source {
        IngestSource::Path(path) => read_rows_from_path(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        IngestSource::Demo => {
            read_rows(DEMO_DATA.as_bytes()).context("failed to read bundled demo data")?
        }
    };
    let rows_read = rows.len();
    debug!(rows_read, rows_skipped = skipped, "rows parsed");

    let normalized = normalize_rows(&rows);
    let loaded = load_entities(&normalized);
    info!(
        patients = loaded.patients.len(),
        appointments = loaded.appointments.len(),
        rows_without_patient_id = loaded.rows_without_patient_id,
        "entities loaded"
    );

    // External appointment ids are not unique across rows, so write outcomes
    // are tracked per staged appointment, never reconstructed by id.
    let mut appointments = Vec::new();
    let mut write_errors = Vec::new();

    for patient in &loaded.patients {
        let email = patient.email.as_deref().unwrap_or("-");
        trace!(
            patient_id = patient.patient_id,
            email = redact_value(email),
            "staging patient"
        );
        store
            .add_patient(patient)
            .with_context(|| format!("failed to stage patient {}", patient.patient_id))?;
    }
    for appointment in &loaded.appointments {
        match store.add_appointment(appointment) {
            Ok(_) => appointments.push(appointment.clone()),
            Err(StoreError::UnknownPatient {
                appointment_id,
                patient_id,
            }) => {
                warn!(
                    appointment_id,
                    "appointment references a patient missing from this run"
                );
                write_errors.push(WriteError {
                    appointment_id,
                    patient_id,
                    message: match patient_id {
                        Some(id) => format!("unknown patient id {id}"),
                        None => "missing patient id".to_string(),
                    },
                });
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to stage appointment {}", appointment.appointment_id)
                });
            }
        }
    }

    store.commit().context("failed to commit ingested records")?;
    info!(
        patients = loaded.patients.len(),
        appointments = appointments.len(),
        "ingestion committed"
    );

    Ok(IngestReport {
        success: true,
        message: format!(
            "created {} patients and {} appointments",
            loaded.patients.len(),
            appointments.len()
        ),
        rows_read,
        rows_skipped: skipped,
        rows_without_patient_id: loaded.rows_without_patient_id,
        patients: loaded.patients,
        appointments,
        write_errors,
    })
}
