//! Digits-only normalization of phone and license numbers
//!
//! The upstream API expects these fields as bare digit strings. Anything
//! that is not an ASCII decimal digit is dropped, order preserved.

use crate::domain::PrescriptionRequest;

/// Strips every non-digit character from a phone number
///
/// # Example
///
/// ```rust
/// use receta::core::sanitize::sanitize_phone_number;
///
/// assert_eq!(sanitize_phone_number("+54 9 11-3456-7890"), "5491134567890");
/// ```
pub fn sanitize_phone_number(phone: &str) -> String {
    digits_only(phone)
}

/// Strips every non-digit character from a license number
pub fn sanitize_license_number(license: &str) -> String {
    digits_only(license)
}

/// Returns a sanitized copy of `request` ready for transmission
///
/// Normalizes the patient and doctor phones when present and the doctor
/// license number when non-empty, and stamps `client_app_id`. Document
/// numbers, CUIL and every other field are left as they are.
pub fn sanitize_request(request: &PrescriptionRequest, client_app_id: i64) -> PrescriptionRequest {
    let mut sanitized = request.clone();

    if let Some(phone) = sanitized.patient.phone.as_mut() {
        *phone = sanitize_phone_number(phone);
    }
    if let Some(phone) = sanitized.doctor.phone.as_mut() {
        *phone = sanitize_phone_number(phone);
    }

    let license = &mut sanitized.doctor.license.number;
    if !license.is_empty() {
        *license = sanitize_license_number(license);
    }

    sanitized.client_app_id = client_app_id;
    sanitized
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
