use chrono::NaiveDateTime;

/// The ten source columns, in canonical order.
///
/// Header matching is order-independent; this order is used only for
/// reporting and for constructing rows in tests.
pub const COLUMNS: [&str; 10] = [
    "patient_id",
    "first_name",
    "last_name",
    "dob",
    "email",
    "phone",
    "address",
    "appointment_id",
    "appointment_date",
    "appointment_type",
];

/// One raw row as read from the source file.
///
/// Every field is optional: a cell may be missing because the column is
/// absent from the header or because the cell is blank. Values are trimmed
/// but otherwise untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub patient_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub appointment_id: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_type: Option<String>,
}

/// A row after per-column normalization and validation.
///
/// Fields that failed validation are absent; names and appointment type use
/// documented string defaults instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    pub patient_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDateTime>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub appointment_id: Option<i64>,
    pub appointment_date: Option<NaiveDateTime>,
    pub appointment_type: String,
}

impl NormalizedRow {
    /// True iff this row carries a usable appointment identifier.
    pub fn has_appointment(&self) -> bool {
        self.appointment_id.is_some()
    }
}
