#![deny(unsafe_code)]

//! Persistence sink for patients and appointments.
//!
//! The pipeline talks to a [`RecordStore`] handle that is session-scoped and
//! parameter-passed, never a process-wide global. Writes are staged against a
//! run and made durable by a single [`RecordStore::commit`]; the sink owns
//! surrogate key assignment and enforces the appointment-to-patient
//! referential relationship at write time.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

use clinic_model::{Appointment, AppointmentRecord, Patient, PatientWithAppointments};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("appointment {appointment_id} references unknown patient {patient_id:?}")]
    UnknownPatient {
        appointment_id: i64,
        patient_id: Option<i64>,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Contract between the ingestion pipeline and a relational sink.
pub trait RecordStore {
    /// Stages one patient; returns the surrogate id.
    fn add_patient(&mut self, patient: &Patient) -> Result<i64>;

    /// Stages one appointment; returns the surrogate id.
    ///
    /// Fails with [`StoreError::UnknownPatient`] when the appointment's
    /// `patient_id` is absent or matches no patient staged in this run or
    /// previously persisted.
    fn add_appointment(&mut self, appointment: &Appointment) -> Result<i64>;

    /// Makes the staged run durable. One commit per run.
    fn commit(&mut self) -> Result<()>;

    /// All persisted patients, each with its owned appointments.
    fn patients(&self) -> Result<Vec<PatientWithAppointments>>;

    /// All persisted appointments, flat.
    fn appointments(&self) -> Result<Vec<AppointmentRecord>>;

    /// One patient by external id; `Ok(None)` for a non-existent id, never
    /// an error.
    fn patient(&self, patient_id: i64) -> Result<Option<PatientWithAppointments>>;
}
