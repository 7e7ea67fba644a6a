use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A patient entity built from the first raw row seen for its external id.
///
/// `patient_id` is the business identifier from the source file; the
/// surrogate key is assigned by the store (see [`PatientRecord`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: i64,
    /// Trimmed and capitalized; empty string when the source value is absent.
    pub first_name: String,
    /// Trimmed and capitalized; empty string when the source value is absent.
    pub last_name: String,
    pub dob: Option<NaiveDateTime>,
    /// Validated email, or absent when the source value failed validation.
    pub email: Option<String>,
    /// Digits-only validated phone, or absent.
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// An appointment entity built from a row with a non-empty appointment id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: i64,
    pub appointment_date: Option<NaiveDateTime>,
    /// Upper-cased; `"UNKNOWN"` when the source value is absent.
    pub appointment_type: String,
    /// External id of the owning patient. Absent when the source row lacked a
    /// usable `patient_id`; the store rejects such appointments at write time.
    pub patient_id: Option<i64>,
}

/// A persisted patient with its store-assigned surrogate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: i64,
    #[serde(flatten)]
    pub patient: Patient,
}

/// A persisted appointment with its store-assigned surrogate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: i64,
    #[serde(flatten)]
    pub appointment: Appointment,
}

/// Read-side projection: a patient together with its owned appointments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientWithAppointments {
    #[serde(flatten)]
    pub record: PatientRecord,
    pub appointments: Vec<AppointmentRecord>,
}
