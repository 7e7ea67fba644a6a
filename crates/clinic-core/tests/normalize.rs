//! Tests for the row normalizer: per-column cleaning and downgrade-to-absent
//! behavior for malformed values.

use chrono::NaiveDate;
use clinic_core::normalize::normalize_rows;
use clinic_model::RawRow;

fn raw(values: &[(&str, &str)]) -> RawRow {
    let mut row = RawRow::default();
    for (column, value) in values {
        let value = Some((*value).to_string());
        match *column {
            "patient_id" => row.patient_id = value,
            "first_name" => row.first_name = value,
            "last_name" => row.last_name = value,
            "dob" => row.dob = value,
            "email" => row.email = value,
            "phone" => row.phone = value,
            "address" => row.address = value,
            "appointment_id" => row.appointment_id = value,
            "appointment_date" => row.appointment_date = value,
            "appointment_type" => row.appointment_type = value,
            other => panic!("unknown column {other}"),
        }
    }
    row
}

#[test]
fn cleans_every_column() {
    let rows = vec![raw(&[
        ("patient_id", "7"),
        ("first_name", "  bob"),
        ("last_name", "SMITH "),
        ("dob", "1987-11-02"),
        ("email", "bob[at]example.com"),
        ("phone", "(555) 123-4567"),
        ("address", " 12 Main St "),
        ("appointment_id", "5"),
        ("appointment_date", "03/05/2024 09:30"),
        ("appointment_type", "checkup"),
    ])];

    let normalized = normalize_rows(&rows);
    assert_eq!(normalized.len(), 1);
    let row = &normalized[0];

    assert_eq!(row.patient_id, Some(7));
    assert_eq!(row.first_name, "Bob");
    assert_eq!(row.last_name, "Smith");
    assert_eq!(
        row.dob,
        NaiveDate::from_ymd_opt(1987, 11, 2).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(row.email.as_deref(), Some("bob@example.com"));
    assert_eq!(row.phone.as_deref(), Some("5551234567"));
    assert_eq!(row.address.as_deref(), Some("12 Main St"));
    assert_eq!(row.appointment_id, Some(5));
    assert_eq!(
        row.appointment_date,
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 30, 0)
    );
    assert_eq!(row.appointment_type, "CHECKUP");
    assert!(row.has_appointment());
}

#[test]
fn bad_values_downgrade_to_absent() {
    let rows = vec![raw(&[
        ("patient_id", "7"),
        ("dob", "sometime last year"),
        ("email", "not-an-email"),
        ("phone", "123"),
        ("appointment_id", "soon"),
        ("appointment_date", ""),
    ])];

    let row = &normalize_rows(&rows)[0];
    assert_eq!(row.patient_id, Some(7));
    assert!(row.dob.is_none());
    assert!(row.email.is_none());
    assert!(row.phone.is_none());
    assert!(row.appointment_id.is_none());
    assert!(row.appointment_date.is_none());
    assert!(!row.has_appointment());
}

#[test]
fn absent_columns_use_documented_defaults() {
    let row = &normalize_rows(&[RawRow::default()])[0];
    assert!(row.patient_id.is_none());
    assert_eq!(row.first_name, "");
    assert_eq!(row.last_name, "");
    assert_eq!(row.appointment_type, "UNKNOWN");
    assert!(row.address.is_none());
}

#[test]
fn float_shaped_identifiers_parse() {
    // Spreadsheet exports render integer columns with gaps as floats.
    let rows = vec![raw(&[("patient_id", "42.0"), ("appointment_id", "7.5")])];
    let row = &normalize_rows(&rows)[0];
    assert_eq!(row.patient_id, Some(42));
    assert!(row.appointment_id.is_none());
}
