#![deny(unsafe_code)]

pub mod entities;
pub mod report;
pub mod row;

pub use entities::{
    Appointment, AppointmentRecord, Patient, PatientRecord, PatientWithAppointments,
};
pub use report::{IngestReport, WriteError};
pub use row::{COLUMNS, NormalizedRow, RawRow};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes() {
        let report = IngestReport {
            success: true,
            message: "ok".to_string(),
            rows_read: 2,
            rows_skipped: 0,
            rows_without_patient_id: 0,
            patients: vec![Patient {
                patient_id: 1,
                first_name: "Bob".to_string(),
                last_name: "Smith".to_string(),
                dob: None,
                email: Some("bob@example.com".to_string()),
                phone: None,
                address: None,
            }],
            appointments: vec![],
            write_errors: vec![],
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: IngestReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round.patients_created(), 1);
        assert!(!round.has_write_errors());
    }

    #[test]
    fn row_appointment_flag_follows_identifier() {
        let mut row = NormalizedRow {
            patient_id: Some(1),
            ..NormalizedRow::default()
        };
        assert!(!row.has_appointment());
        row.appointment_id = Some(5);
        assert!(row.has_appointment());
    }
}
