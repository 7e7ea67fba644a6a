#![deny(unsafe_code)]

//! Core ingestion logic: field validators, permissive date parsing, row
//! normalization, and the deduplicating entity loader.

pub mod datetime;
pub mod loader;
pub mod normalize;
pub mod validate;

pub use datetime::parse_mixed_datetime;
pub use loader::{LoadResult, load_entities};
pub use normalize::{normalize_row, normalize_rows};
pub use validate::{
    UNKNOWN_APPOINTMENT_TYPE, normalize_appointment_type, normalize_name, repair_email,
    strip_non_digits, validate_email, validate_phone,
};
