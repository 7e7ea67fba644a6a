//! CSV reading for patient/appointment source files.
//!
//! The header row is matched case-insensitively and order-independently.
//! Only `patient_id` is required in the header; any other known column the
//! header omits is absent for every row, and unknown columns are ignored.
//! Data rows that cannot be parsed at all, or whose field count does not
//! match the header, are skipped with a warning; the batch never fails for
//! one bad row. Header errors remain fatal.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use clinic_model::RawRow;

use crate::{IngestError, Result};

/// Raw rows read from one source, plus structural-skip accounting.
#[derive(Debug, Default)]
pub struct RowSet {
    pub rows: Vec<RawRow>,
    /// Rows skipped as structurally unusable (parse failure or column-count
    /// mismatch).
    pub skipped: usize,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_ascii_lowercase()
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn cell(record: &StringRecord, positions: &BTreeMap<String, usize>, name: &str) -> Option<String> {
    positions
        .get(name)
        .and_then(|&index| record.get(index))
        .and_then(normalize_cell)
}

/// Reads raw rows from any byte source.
pub fn read_rows<R: Read>(reader: R) -> Result<RowSet> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestError::MissingHeader);
    }

    let mut positions: BTreeMap<String, usize> = BTreeMap::new();
    for (index, name) in headers.iter().enumerate() {
        positions.entry(normalize_header(name)).or_insert(index);
    }
    if !positions.contains_key("patient_id") {
        return Err(IngestError::MissingPatientIdColumn);
    }

    let expected = headers.len();
    let mut set = RowSet::default();
    for (index, record) in csv_reader.records().enumerate() {
        let row_number = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                warn!(row = row_number, %error, "skipping unparseable row");
                set.skipped += 1;
                continue;
            }
        };
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if record.len() != expected {
            warn!(
                row = row_number,
                fields = record.len(),
                expected,
                "skipping row with mismatched column count"
            );
            set.skipped += 1;
            continue;
        }
        set.rows.push(RawRow {
            patient_id: cell(&record, &positions, "patient_id"),
            first_name: cell(&record, &positions, "first_name"),
            last_name: cell(&record, &positions, "last_name"),
            dob: cell(&record, &positions, "dob"),
            email: cell(&record, &positions, "email"),
            phone: cell(&record, &positions, "phone"),
            address: cell(&record, &positions, "address"),
            appointment_id: cell(&record, &positions, "appointment_id"),
            appointment_date: cell(&record, &positions, "appointment_date"),
            appointment_type: cell(&record, &positions, "appointment_type"),
        });
    }
    Ok(set)
}

/// Reads raw rows from a file; a missing or unreadable file is fatal for
/// the run.
pub fn read_rows_from_path(path: &Path) -> Result<RowSet> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_rows(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_match_case_insensitively_and_in_any_order() {
        let input = "Email,PATIENT_ID,first_name\nbob@example.com,1,bob\n";
        let set = read_rows(input.as_bytes()).unwrap();
        assert_eq!(set.rows.len(), 1);
        assert_eq!(set.rows[0].patient_id.as_deref(), Some("1"));
        assert_eq!(set.rows[0].email.as_deref(), Some("bob@example.com"));
        assert_eq!(set.rows[0].first_name.as_deref(), Some("bob"));
        assert!(set.rows[0].last_name.is_none());
    }

    #[test]
    fn mismatched_column_count_skips_row() {
        let input = "patient_id,first_name,email\n1,bob,bob@example.com\n2,ann\n3,eve,eve@example.com\n";
        let set = read_rows(input.as_bytes()).unwrap();
        assert_eq!(set.rows.len(), 2);
        assert_eq!(set.skipped, 1);
    }

    #[test]
    fn unparseable_row_is_skipped_not_fatal() {
        // Invalid UTF-8 mid-file fails that record only.
        let input: &[u8] = b"patient_id,first_name\n1,bob\n2,\xff\xfe\n3,eve\n";
        let set = read_rows(input).unwrap();
        assert_eq!(set.rows.len(), 2);
        assert_eq!(set.skipped, 1);
        assert_eq!(set.rows[1].patient_id.as_deref(), Some("3"));
    }

    #[test]
    fn blank_cells_are_absent() {
        let input = "patient_id,first_name,email\n1,,  \n";
        let set = read_rows(input.as_bytes()).unwrap();
        assert!(set.rows[0].first_name.is_none());
        assert!(set.rows[0].email.is_none());
    }

    #[test]
    fn missing_patient_id_column_is_fatal() {
        let input = "first_name,email\nbob,bob@example.com\n";
        let error = read_rows(input.as_bytes()).unwrap_err();
        assert!(matches!(error, IngestError::MissingPatientIdColumn));
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let input = "\u{feff}patient_id,first_name\n1,bob\n";
        let set = read_rows(input.as_bytes()).unwrap();
        assert_eq!(set.rows[0].patient_id.as_deref(), Some("1"));
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let input = "patient_id,insurance_plan\n1,gold\n";
        let set = read_rows(input.as_bytes()).unwrap();
        assert_eq!(set.rows.len(), 1);
        assert_eq!(set.rows[0].patient_id.as_deref(), Some("1"));
    }
}
