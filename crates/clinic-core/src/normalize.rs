//! Row normalization: per-column validator application.
//!
//! Normalization is total over the declared column set. A single bad value
//! never fails the batch; it downgrades to absent with a warning. Field
//! values are never logged here (patient data), only field names and row
//! positions.

use tracing::warn;

use clinic_model::{NormalizedRow, RawRow};

use crate::datetime::parse_mixed_datetime;
use crate::validate::{
    normalize_appointment_type, normalize_name, repair_email, strip_non_digits, validate_email,
    validate_phone,
};

/// Normalizes every row in input order.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<NormalizedRow> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| normalize_row(index + 1, row))
        .collect()
}

/// Applies the field validators to one raw row.
///
/// `row_number` is 1-based and used only for warnings.
pub fn normalize_row(row_number: usize, raw: &RawRow) -> NormalizedRow {
    let email = raw.email.as_deref().map(repair_email);
    let phone = raw.phone.as_deref().map(strip_non_digits);
    NormalizedRow {
        patient_id: parse_identifier("patient_id", row_number, raw.patient_id.as_deref()),
        first_name: normalize_name(raw.first_name.as_deref()),
        last_name: normalize_name(raw.last_name.as_deref()),
        dob: parse_datetime_field("dob", row_number, raw.dob.as_deref()),
        email: validated_field(
            "email",
            row_number,
            non_blank(raw.email.as_deref()),
            validate_email(email.as_deref()),
        ),
        phone: validated_field(
            "phone",
            row_number,
            non_blank(raw.phone.as_deref()),
            validate_phone(phone.as_deref()),
        ),
        address: raw
            .address
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string),
        appointment_id: parse_identifier(
            "appointment_id",
            row_number,
            raw.appointment_id.as_deref(),
        ),
        appointment_date: parse_datetime_field(
            "appointment_date",
            row_number,
            raw.appointment_date.as_deref(),
        ),
        appointment_type: normalize_appointment_type(raw.appointment_type.as_deref()),
    }
}

/// Parses an external identifier, tolerating the `42.0` shape spreadsheet
/// exports produce for integer columns with missing values.
fn parse_identifier(field: &str, row_number: usize, raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    if let Ok(value) = trimmed.parse::<f64>()
        && value.fract() == 0.0
        && value.abs() < i64::MAX as f64
    {
        return Some(value as i64);
    }
    warn!(field, row = row_number, "non-integer identifier; treating as absent");
    None
}

fn non_blank(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| !value.trim().is_empty())
}

fn parse_datetime_field(
    field: &str,
    row_number: usize,
    raw: Option<&str>,
) -> Option<chrono::NaiveDateTime> {
    let had_value = non_blank(raw);
    let parsed = parse_mixed_datetime(raw);
    if had_value && parsed.is_none() {
        warn!(field, row = row_number, "unparseable date; treating as absent");
    }
    parsed
}

fn validated_field(
    field: &str,
    row_number: usize,
    had_value: bool,
    validated: Option<String>,
) -> Option<String> {
    if had_value && validated.is_none() {
        warn!(field, row = row_number, "invalid value; treating as absent");
    }
    validated
}
