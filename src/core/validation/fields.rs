//! Field-level format checks
//!
//! Each check returns `Ok(())` or the human-readable violation. They are
//! purely syntactic: no registry lookups, no calendar arithmetic.

use crate::domain::DocumentType;
use regex::Regex;
use std::sync::OnceLock;

/// Outcome of a single field check
pub type FieldCheck = Result<(), String>;

/// `YYYY-MM-DD` or `DD/MM/YYYY`, ASCII digits only
const DATE_PATTERN: &str = r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{2}/[0-9]{2}/[0-9]{4})$";

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_PATTERN).expect("date pattern is a valid regex"))
}

/// Checks the document number length against the bounds of its document type
///
/// Surrounding whitespace is trimmed before measuring; length is counted in
/// characters.
///
/// # Examples
///
/// ```
/// use receta::core::validation::validate_document_number;
/// use receta::domain::DocumentType;
///
/// assert!(validate_document_number("1234", DocumentType::NationalId).is_ok());
/// assert!(validate_document_number("123", DocumentType::NationalId).is_err());
/// ```
pub fn validate_document_number(number: &str, document_type: DocumentType) -> FieldCheck {
    let length = number.trim().chars().count();
    let (min, max) = document_type.length_bounds();

    if length < min || length > max {
        return Err(format!(
            "{document_type} must have between {min} and {max} characters"
        ));
    }

    Ok(())
}

/// Checks that a date is written as `YYYY-MM-DD` or `DD/MM/YYYY`
///
/// Only the shape is checked: `2024-02-30` is accepted.
pub fn validate_date_format(date: &str) -> FieldCheck {
    if !date_regex().is_match(date) {
        return Err("invalid date format, use YYYY-MM-DD or DD/MM/YYYY".to_string());
    }
    Ok(())
}

/// Checks that an email address contains `@`
pub fn validate_email(email: &str) -> FieldCheck {
    if !email.contains('@') {
        return Err("email must contain @".to_string());
    }
    Ok(())
}

/// Checks that a CUIL has between 11 and 13 digits once non-digits are stripped
pub fn validate_cuil(cuil: &str) -> FieldCheck {
    let digits = cuil.chars().filter(char::is_ascii_digit).count();

    if !(11..=13).contains(&digits) {
        return Err("CUIL must have between 11 and 13 digits".to_string());
    }

    Ok(())
}
