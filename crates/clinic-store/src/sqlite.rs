//! SQLite-backed sink.
//!
//! One connection per handle, one explicit transaction per ingestion run:
//! the first staged write opens the transaction and [`RecordStore::commit`]
//! closes it, so a failed run rolls back when the handle drops. Referential
//! integrity is enforced here rather than by a SQL foreign key because the
//! schema tolerates duplicate external patient ids across runs (an
//! acknowledged cross-run limitation) and a FK target would require them to
//! be unique.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use clinic_model::{
    Appointment, AppointmentRecord, Patient, PatientRecord, PatientWithAppointments,
};

use crate::{RecordStore, Result, StoreError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS patient (
    id INTEGER PRIMARY KEY,
    patient_id INTEGER NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    dob TEXT,
    email TEXT,
    phone TEXT,
    address TEXT
);
CREATE INDEX IF NOT EXISTS idx_patient_external ON patient(patient_id);
CREATE TABLE IF NOT EXISTS appointment (
    id INTEGER PRIMARY KEY,
    appointment_id INTEGER NOT NULL,
    appointment_date TEXT,
    appointment_type TEXT NOT NULL,
    patient_id INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_appointment_patient ON appointment(patient_id);
";

/// A [`RecordStore`] over a SQLite database file.
pub struct SqliteStore {
    conn: Connection,
    in_transaction: bool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.display(), "opened sqlite store");
        Ok(Self {
            conn,
            in_transaction: false,
        })
    }

    /// Opens a throwaway in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            in_transaction: false,
        })
    }

    fn begin_if_needed(&mut self) -> Result<()> {
        if !self.in_transaction {
            self.conn.execute_batch("BEGIN")?;
            self.in_transaction = true;
        }
        Ok(())
    }

    // Sees rows staged in the open transaction as well as persisted ones.
    fn patient_exists(&self, patient_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM patient WHERE patient_id = ?1",
            params![patient_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn patient_record(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get("id")?,
        patient: Patient {
            patient_id: row.get("patient_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            dob: row.get("dob")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            address: row.get("address")?,
        },
    })
}

fn appointment_record(row: &Row<'_>) -> rusqlite::Result<AppointmentRecord> {
    Ok(AppointmentRecord {
        id: row.get("id")?,
        appointment: Appointment {
            appointment_id: row.get("appointment_id")?,
            appointment_date: row.get("appointment_date")?,
            appointment_type: row.get("appointment_type")?,
            patient_id: Some(row.get("patient_id")?),
        },
    })
}

impl RecordStore for SqliteStore {
    fn add_patient(&mut self, patient: &Patient) -> Result<i64> {
        self.begin_if_needed()?;
        self.conn.execute(
            "INSERT INTO patient (patient_id, first_name, last_name, dob, email, phone, address)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                patient.patient_id,
                patient.first_name,
                patient.last_name,
                patient.dob,
                patient.email,
                patient.phone,
                patient.address,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn add_appointment(&mut self, appointment: &Appointment) -> Result<i64> {
        self.begin_if_needed()?;
        let owner = match appointment.patient_id {
            Some(patient_id) if self.patient_exists(patient_id)? => patient_id,
            other => {
                return Err(StoreError::UnknownPatient {
                    appointment_id: appointment.appointment_id,
                    patient_id: other,
                });
            }
        };
        self.conn.execute(
            "INSERT INTO appointment (appointment_id, appointment_date, appointment_type, patient_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                appointment.appointment_id,
                appointment.appointment_date,
                appointment.appointment_type,
                owner,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn commit(&mut self) -> Result<()> {
        if self.in_transaction {
            self.conn.execute_batch("COMMIT")?;
            self.in_transaction = false;
        }
        Ok(())
    }

    fn patients(&self) -> Result<Vec<PatientWithAppointments>> {
        let mut statement = self.conn.prepare(
            "SELECT id, patient_id, first_name, last_name, dob, email, phone, address
             FROM patient ORDER BY id",
        )?;
        let records: Vec<PatientRecord> = statement
            .query_map([], patient_record)?
            .collect::<rusqlite::Result<_>>()?;
        records
            .into_iter()
            .map(|record| {
                let appointments = self.owned_appointments(record.patient.patient_id)?;
                Ok(PatientWithAppointments {
                    record,
                    appointments,
                })
            })
            .collect()
    }

    fn appointments(&self) -> Result<Vec<AppointmentRecord>> {
        let mut statement = self.conn.prepare(
            "SELECT id, appointment_id, appointment_date, appointment_type, patient_id
             FROM appointment ORDER BY id",
        )?;
        let records = statement
            .query_map([], appointment_record)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(records)
    }

    fn patient(&self, patient_id: i64) -> Result<Option<PatientWithAppointments>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, patient_id, first_name, last_name, dob, email, phone, address
                 FROM patient WHERE patient_id = ?1 ORDER BY id LIMIT 1",
                params![patient_id],
                patient_record,
            )
            .optional()?;
        match record {
            Some(record) => {
                let appointments = self.owned_appointments(patient_id)?;
                Ok(Some(PatientWithAppointments {
                    record,
                    appointments,
                }))
            }
            None => Ok(None),
        }
    }
}

impl SqliteStore {
    fn owned_appointments(&self, patient_id: i64) -> Result<Vec<AppointmentRecord>> {
        let mut statement = self.conn.prepare(
            "SELECT id, appointment_id, appointment_date, appointment_type, patient_id
             FROM appointment WHERE patient_id = ?1 ORDER BY id",
        )?;
        let records = statement
            .query_map(params![patient_id], appointment_record)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(records)
    }
}
