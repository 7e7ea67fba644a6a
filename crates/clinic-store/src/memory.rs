//! In-memory sink for tests and dry runs.

use clinic_model::{
    Appointment, AppointmentRecord, Patient, PatientRecord, PatientWithAppointments,
};

use crate::{RecordStore, Result, StoreError};

/// A [`RecordStore`] that keeps everything in process memory.
///
/// Mirrors the commit discipline of the SQLite store: adds are staged and
/// become visible to reads only after [`RecordStore::commit`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: Vec<PatientRecord>,
    appointments: Vec<AppointmentRecord>,
    staged_patients: Vec<PatientRecord>,
    staged_appointments: Vec<AppointmentRecord>,
    next_patient_id: i64,
    next_appointment_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn known_patient(&self, patient_id: i64) -> bool {
        self.patients
            .iter()
            .chain(&self.staged_patients)
            .any(|record| record.patient.patient_id == patient_id)
    }
}

impl RecordStore for MemoryStore {
    fn add_patient(&mut self, patient: &Patient) -> Result<i64> {
        self.next_patient_id += 1;
        self.staged_patients.push(PatientRecord {
            id: self.next_patient_id,
            patient: patient.clone(),
        });
        Ok(self.next_patient_id)
    }

    fn add_appointment(&mut self, appointment: &Appointment) -> Result<i64> {
        let known = appointment
            .patient_id
            .is_some_and(|id| self.known_patient(id));
        if !known {
            return Err(StoreError::UnknownPatient {
                appointment_id: appointment.appointment_id,
                patient_id: appointment.patient_id,
            });
        }
        self.next_appointment_id += 1;
        self.staged_appointments.push(AppointmentRecord {
            id: self.next_appointment_id,
            appointment: appointment.clone(),
        });
        Ok(self.next_appointment_id)
    }

    fn commit(&mut self) -> Result<()> {
        self.patients.append(&mut self.staged_patients);
        self.appointments.append(&mut self.staged_appointments);
        Ok(())
    }

    fn patients(&self) -> Result<Vec<PatientWithAppointments>> {
        Ok(self
            .patients
            .iter()
            .map(|record| PatientWithAppointments {
                record: record.clone(),
                appointments: self.owned_appointments(record.patient.patient_id),
            })
            .collect())
    }

    fn appointments(&self) -> Result<Vec<AppointmentRecord>> {
        Ok(self.appointments.clone())
    }

    fn patient(&self, patient_id: i64) -> Result<Option<PatientWithAppointments>> {
        Ok(self
            .patients
            .iter()
            .find(|record| record.patient.patient_id == patient_id)
            .map(|record| PatientWithAppointments {
                record: record.clone(),
                appointments: self.owned_appointments(patient_id),
            }))
    }
}

impl MemoryStore {
    fn owned_appointments(&self, patient_id: i64) -> Vec<AppointmentRecord> {
        self.appointments
            .iter()
            .filter(|record| record.appointment.patient_id == Some(patient_id))
            .cloned()
            .collect()
    }
}
