//! Sink contract tests, run against both store implementations.

use chrono::NaiveDate;
use clinic_model::{Appointment, Patient};
use clinic_store::{MemoryStore, RecordStore, SqliteStore, StoreError};

fn patient(patient_id: i64, first_name: &str) -> Patient {
    Patient {
        patient_id,
        first_name: first_name.to_string(),
        last_name: "Smith".to_string(),
        dob: NaiveDate::from_ymd_opt(1987, 11, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0),
        email: Some("bob@example.com".to_string()),
        phone: Some("5551234567".to_string()),
        address: None,
    }
}

fn appointment(appointment_id: i64, patient_id: Option<i64>) -> Appointment {
    Appointment {
        appointment_id,
        appointment_date: NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0),
        appointment_type: "CHECKUP".to_string(),
        patient_id,
    }
}

fn contract_roundtrip(store: &mut dyn RecordStore) {
    store.add_patient(&patient(1, "Bob")).unwrap();
    store.add_patient(&patient(2, "Ann")).unwrap();
    store.add_appointment(&appointment(5, Some(1))).unwrap();
    store.add_appointment(&appointment(6, Some(1))).unwrap();
    store.commit().unwrap();

    let patients = store.patients().unwrap();
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].record.patient.first_name, "Bob");
    assert_eq!(patients[0].appointments.len(), 2);
    assert_eq!(patients[1].appointments.len(), 0);

    let flat = store.appointments().unwrap();
    assert_eq!(flat.len(), 2);
    assert_eq!(flat[0].appointment.appointment_type, "CHECKUP");

    let fetched = store.patient(1).unwrap().expect("patient 1 exists");
    assert_eq!(fetched.record.patient.patient_id, 1);
    assert_eq!(
        fetched.record.patient.dob,
        NaiveDate::from_ymd_opt(1987, 11, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
    );
    assert_eq!(fetched.appointments.len(), 2);
}

fn contract_lookup_miss(store: &mut dyn RecordStore) {
    store.add_patient(&patient(1, "Bob")).unwrap();
    store.commit().unwrap();
    // Absent result with success status, not an error.
    assert!(store.patient(999).unwrap().is_none());
}

fn contract_rejects_unknown_owner(store: &mut dyn RecordStore) {
    store.add_patient(&patient(1, "Bob")).unwrap();

    let error = store.add_appointment(&appointment(5, Some(42))).unwrap_err();
    assert!(matches!(
        error,
        StoreError::UnknownPatient {
            appointment_id: 5,
            patient_id: Some(42),
        }
    ));

    let error = store.add_appointment(&appointment(6, None)).unwrap_err();
    assert!(matches!(
        error,
        StoreError::UnknownPatient {
            appointment_id: 6,
            patient_id: None,
        }
    ));
}

fn contract_same_run_reference(store: &mut dyn RecordStore) {
    // The owner is staged in the same run, not yet committed.
    store.add_patient(&patient(1, "Bob")).unwrap();
    store.add_appointment(&appointment(5, Some(1))).unwrap();
    store.commit().unwrap();
    assert_eq!(store.appointments().unwrap().len(), 1);
}

#[test]
fn memory_store_contract() {
    contract_roundtrip(&mut MemoryStore::new());
    contract_lookup_miss(&mut MemoryStore::new());
    contract_rejects_unknown_owner(&mut MemoryStore::new());
    contract_same_run_reference(&mut MemoryStore::new());
}

#[test]
fn sqlite_store_contract() {
    contract_roundtrip(&mut SqliteStore::open_in_memory().unwrap());
    contract_lookup_miss(&mut SqliteStore::open_in_memory().unwrap());
    contract_rejects_unknown_owner(&mut SqliteStore::open_in_memory().unwrap());
    contract_same_run_reference(&mut SqliteStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_store_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.add_patient(&patient(1, "Bob")).unwrap();
        store.add_appointment(&appointment(5, Some(1))).unwrap();
        store.commit().unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let fetched = store.patient(1).unwrap().expect("persisted patient");
    assert_eq!(fetched.appointments.len(), 1);

    // A later run may reference a patient persisted by an earlier run.
    let mut store = SqliteStore::open(&path).unwrap();
    store.add_appointment(&appointment(6, Some(1))).unwrap();
    store.commit().unwrap();
    assert_eq!(store.appointments().unwrap().len(), 2);
}

#[test]
fn uncommitted_run_rolls_back_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.add_patient(&patient(1, "Bob")).unwrap();
        // No commit: the handle drops with the transaction open.
    }

    let store = SqliteStore::open(&path).unwrap();
    assert!(store.patient(1).unwrap().is_none());
}
