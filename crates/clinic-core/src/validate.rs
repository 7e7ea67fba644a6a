//! Field validators for patient/appointment source data.
//!
//! All validators are pure, total functions over their declared input domain:
//! absent, blank, or malformed input downgrades to an absent result (or a
//! documented string default), never an error. "Absent" is always
//! `Option::None`, distinct from an empty string.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel used when a row carries no appointment type.
pub const UNKNOWN_APPOINTMENT_TYPE: &str = "UNKNOWN";

/// Minimum accepted phone length after digit stripping.
pub const PHONE_MIN_DIGITS: usize = 10;

/// Maximum accepted phone length after digit stripping.
pub const PHONE_MAX_DIGITS: usize = 14;

// Best-effort check only: local part, domain, and a TLD of two or more
// letters. No network or MX validation.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

/// Returns the trimmed input unchanged when it looks like a valid email,
/// absent otherwise (including for null/blank input).
pub fn validate_email(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    EMAIL_PATTERN
        .is_match(trimmed)
        .then(|| trimmed.to_string())
}

/// Undoes the common `[at]` obfuscation before validation.
pub fn repair_email(raw: &str) -> String {
    raw.replace("[at]", "@")
}

/// Removes every non-digit character from a raw phone value.
///
/// Digit stripping is the caller's step; [`validate_phone`] then judges the
/// remaining digit string on length alone.
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Returns the digit string unchanged when its length is within the accepted
/// range, absent otherwise (including for null/blank or non-digit input).
pub fn validate_phone(digits: Option<&str>) -> Option<String> {
    let digits = digits?.trim();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS)
        .contains(&digits.chars().count())
        .then(|| digits.to_string())
}

/// Trims and capitalizes a name: first character upper-cased, the rest
/// lower-cased. Absent input becomes the empty string. Idempotent.
pub fn normalize_name(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => {
            // Keep only the leading character of a multi-char uppercase
            // expansion upper-cased (so "ß" becomes "Ss", not "SS"); this
            // keeps repeated normalization a fixed point.
            let mut expansion = first.to_uppercase();
            let mut name = String::new();
            if let Some(head) = expansion.next() {
                name.push(head);
            }
            let tail: String = expansion.collect();
            name.push_str(&tail.to_lowercase());
            name.push_str(&chars.as_str().to_lowercase());
            name
        }
        None => String::new(),
    }
}

/// Upper-cases an appointment type; absent or blank input becomes the
/// [`UNKNOWN_APPOINTMENT_TYPE`] sentinel.
pub fn normalize_appointment_type(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_uppercase(),
        _ => UNKNOWN_APPOINTMENT_TYPE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_passes_unchanged() {
        assert_eq!(validate_email(Some("a@b.com")), Some("a@b.com".to_string()));
        assert_eq!(
            validate_email(Some("  o'brien+clinic@mail.example.org  ")),
            Some("o'brien+clinic@mail.example.org".to_string())
        );
    }

    #[test]
    fn malformed_email_is_absent() {
        assert_eq!(validate_email(Some("not-an-email")), None);
        assert_eq!(validate_email(Some("a@b")), None);
        assert_eq!(validate_email(Some("a@b.c")), None);
        assert_eq!(validate_email(Some("")), None);
        assert_eq!(validate_email(Some("   ")), None);
        assert_eq!(validate_email(None), None);
    }

    #[test]
    fn repair_email_undoes_at_obfuscation() {
        assert_eq!(repair_email("bob[at]example.com"), "bob@example.com");
        assert_eq!(repair_email("bob@example.com"), "bob@example.com");
    }

    #[test]
    fn phone_accepts_ten_to_fourteen_digits() {
        assert_eq!(
            validate_phone(Some("5551234567")),
            Some("5551234567".to_string())
        );
        assert_eq!(
            validate_phone(Some("55512345678901")),
            Some("55512345678901".to_string())
        );
        assert_eq!(validate_phone(Some("123")), None);
        assert_eq!(validate_phone(Some("555123456789012")), None);
        assert_eq!(validate_phone(Some("")), None);
        assert_eq!(validate_phone(None), None);
    }

    #[test]
    fn formatted_phone_strips_to_accepted_digits() {
        let digits = strip_non_digits("(555) 123-4567");
        assert_eq!(digits, "5551234567");
        assert_eq!(validate_phone(Some(&digits)), Some(digits.clone()));
    }

    #[test]
    fn name_normalization_is_idempotent() {
        assert_eq!(normalize_name(Some("  john")), "John");
        assert_eq!(normalize_name(Some("John")), "John");
        assert_eq!(normalize_name(Some("ROBERT")), "Robert");
        assert_eq!(normalize_name(Some("   ")), "");
        assert_eq!(normalize_name(None), "");
    }

    #[test]
    fn appointment_type_defaults_to_unknown() {
        assert_eq!(normalize_appointment_type(Some("checkup")), "CHECKUP");
        assert_eq!(normalize_appointment_type(Some("  ")), "UNKNOWN");
        assert_eq!(normalize_appointment_type(None), "UNKNOWN");
    }
}
