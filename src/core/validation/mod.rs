//! Prescription request validation
//!
//! Group validators collect every violation they find instead of stopping
//! at the first one, so a caller sees all problems in one pass. The
//! request-level result concatenates the groups in the order patient,
//! doctor, medications.
//!
//! # Example
//!
//! ```rust
//! use receta::core::validation::validate_medications;
//! use receta::domain::Medication;
//!
//! let result = validate_medications(&[Medication { quantity: 2, ..Default::default() }]);
//! assert!(!result.valid);
//! assert_eq!(result.errors.len(), 3);
//! ```

mod fields;

pub use fields::{
    validate_cuil, validate_date_format, validate_document_number, validate_email, FieldCheck,
};

use crate::domain::{Doctor, DocumentType, LicenseType, Medication, Patient, PrescriptionRequest};
use serde::Serialize;

/// Maximum length, in characters, of a surname or given name
pub const MAX_NAME_LENGTH: usize = 50;

/// Message reported for an empty medication list
pub const EMPTY_MEDICATIONS_MESSAGE: &str = "at least one medication required";

/// Result of validating part of a prescription request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether no violation was found
    pub valid: bool,

    /// Every violation found, in check order
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Builds a result from the collected violations
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Appends the violations of `other` after those of `self`
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.valid = self.errors.is_empty();
        self
    }
}

/// Validates the required fields of a patient
pub fn validate_patient_required(patient: &Patient) -> ValidationResult {
    let mut errors = Vec::new();

    check_person(
        &mut errors,
        "patient",
        &patient.surname,
        &patient.given_name,
        &patient.document_number,
        patient.document_type,
    );

    if patient.birth_date.is_empty() {
        errors.push("patient birth date is required".to_string());
    } else if let Err(e) = validate_date_format(&patient.birth_date) {
        errors.push(e);
    }

    check_optional_email(&mut errors, "patient", patient.email.as_deref());

    ValidationResult::from_errors(errors)
}

/// Validates the required fields of a doctor, including the license record
pub fn validate_doctor_required(doctor: &Doctor) -> ValidationResult {
    let mut errors = Vec::new();

    check_person(
        &mut errors,
        "doctor",
        &doctor.surname,
        &doctor.given_name,
        &doctor.document_number,
        doctor.document_type,
    );

    let license = &doctor.license;
    if license.number.is_empty() {
        errors.push("doctor license number is required".to_string());
    }
    if license.license_type == LicenseType::Provincial && is_blank(license.province.as_deref()) {
        errors.push("province is required for a provincial license (MP)".to_string());
    }

    check_optional_email(&mut errors, "doctor", doctor.email.as_deref());

    ValidationResult::from_errors(errors)
}

/// Validates the medication lines
///
/// An empty list yields a single error and no per-line checks. Lines are
/// numbered from 1 in messages.
pub fn validate_medications(medications: &[Medication]) -> ValidationResult {
    if medications.is_empty() {
        return ValidationResult::from_errors(vec![EMPTY_MEDICATIONS_MESSAGE.to_string()]);
    }

    let mut errors = Vec::new();

    for (index, medication) in medications.iter().enumerate() {
        let line = index + 1;

        if medication.quantity < 1 {
            errors.push(format!(
                "medication {line}: quantity is required and must be greater than 0"
            ));
        }

        if is_blank(medication.registration_code.as_deref()) {
            let group = [
                ("product name", &medication.product_name),
                ("drug name", &medication.drug_name),
                ("presentation", &medication.presentation),
            ];
            for (field, value) in group {
                if is_blank(value.as_deref()) {
                    errors.push(format!(
                        "medication {line}: {field} is required when no registration code is given"
                    ));
                }
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// Validates a whole request: patient, then doctor, then medications
pub fn validate_request(request: &PrescriptionRequest) -> ValidationResult {
    validate_patient_required(&request.patient)
        .merge(validate_doctor_required(&request.doctor))
        .merge(validate_medications(&request.medications))
}

/// Name and document rules shared by patients and doctors
fn check_person(
    errors: &mut Vec<String>,
    role: &str,
    surname: &str,
    given_name: &str,
    document_number: &str,
    document_type: DocumentType,
) {
    if !is_valid_name(surname) {
        errors.push(format!(
            "{role} surname is required (1-{MAX_NAME_LENGTH} characters)"
        ));
    }
    if !is_valid_name(given_name) {
        errors.push(format!(
            "{role} given name is required (1-{MAX_NAME_LENGTH} characters)"
        ));
    }

    if document_number.is_empty() {
        errors.push(format!("{role} document number is required"));
    } else if let Err(e) = validate_document_number(document_number, document_type) {
        errors.push(e);
    }
}

fn check_optional_email(errors: &mut Vec<String>, role: &str, email: Option<&str>) {
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        if let Err(e) = validate_email(email) {
            errors.push(format!("{role} email: {e}"));
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    let length = name.chars().count();
    (1..=MAX_NAME_LENGTH).contains(&length)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DoctorLicense, Sex};

    fn patient() -> Patient {
        Patient::new(
            "González",
            "Ana",
            DocumentType::NationalId,
            "30567890",
            "2001-07-02",
            Sex::Female,
        )
    }

    fn doctor() -> Doctor {
        Doctor::new(
            "Pérez",
            "Juan",
            DocumentType::NationalId,
            "25123456",
            Sex::Male,
            DoctorLicense::provincial("123456", "Buenos Aires"),
        )
    }

    #[test]
    fn test_valid_patient() {
        let result = validate_patient_required(&patient().with_email("ana@example.com"));
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_patient_collects_every_violation() {
        let mut p = patient();
        p.surname = String::new();
        p.given_name = "x".repeat(51);
        p.document_number = "12".to_string();
        p.birth_date = "2001/07/02".to_string();
        p.email = Some("not-an-email".to_string());

        let result = validate_patient_required(&p);

        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "patient surname is required (1-50 characters)",
                "patient given name is required (1-50 characters)",
                "DNI must have between 4 and 9 characters",
                "invalid date format, use YYYY-MM-DD or DD/MM/YYYY",
                "patient email: email must contain @",
            ]
        );
    }

    #[test]
    fn test_patient_missing_document_and_birth_date() {
        let mut p = patient();
        p.document_number = String::new();
        p.birth_date = String::new();

        let result = validate_patient_required(&p);
        assert_eq!(
            result.errors,
            vec![
                "patient document number is required",
                "patient birth date is required",
            ]
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut p = patient();
        p.surname = "ñ".repeat(50);
        assert!(validate_patient_required(&p).valid);
    }

    #[test]
    fn test_empty_email_is_treated_as_absent() {
        let mut p = patient();
        p.email = Some(String::new());
        assert!(validate_patient_required(&p).valid);
    }

    #[test]
    fn test_valid_doctor() {
        assert!(validate_doctor_required(&doctor()).valid);
    }

    #[test]
    fn test_provincial_license_requires_province() {
        let mut d = doctor();
        d.license.province = None;

        let result = validate_doctor_required(&d);
        assert_eq!(
            result.errors,
            vec!["province is required for a provincial license (MP)"]
        );
    }

    #[test]
    fn test_national_license_does_not_require_province() {
        let mut d = doctor();
        d.license = DoctorLicense::national("998877");
        assert!(validate_doctor_required(&d).valid);
    }

    #[test]
    fn test_doctor_missing_license_number_and_bad_email() {
        let mut d = doctor();
        d.license.number = String::new();
        d.email = Some("dr.perez".to_string());

        let result = validate_doctor_required(&d);
        assert_eq!(
            result.errors,
            vec![
                "doctor license number is required",
                "doctor email: email must contain @",
            ]
        );
    }

    #[test]
    fn test_doctor_document_and_name_rules() {
        let mut d = doctor();
        d.given_name = String::new();
        d.document_type = DocumentType::CivilId;
        d.document_number = "12345".to_string();

        let result = validate_doctor_required(&d);
        assert_eq!(
            result.errors,
            vec![
                "doctor given name is required (1-50 characters)",
                "CI must have between 6 and 9 characters",
            ]
        );

        d.given_name = "Juan".to_string();
        d.document_number = "123456".to_string();
        assert!(validate_doctor_required(&d).valid);
    }

    #[test]
    fn test_negative_quantity_reported_with_other_violations() {
        let payload = r#"{
            "paciente": { "apellido": "", "nombre": "Ana", "tipoDoc": "DNI", "nroDoc": "1",
                          "fechaNacimiento": "x", "sexo": "F" },
            "medico": { "apellido": "Pérez", "nombre": "Juan", "tipoDoc": "DNI",
                        "nroDoc": "25123456", "sexo": "M",
                        "matricula": { "tipo": "MN", "numero": "998877" } },
            "medicamentos": [{ "cantidad": -1, "regNo": "12345" }]
        }"#;

        let request = PrescriptionRequest::from_json(payload).unwrap();
        let result = validate_request(&request);

        assert_eq!(
            result.errors,
            vec![
                "patient surname is required (1-50 characters)",
                "DNI must have between 4 and 9 characters",
                "invalid date format, use YYYY-MM-DD or DD/MM/YYYY",
                "medication 1: quantity is required and must be greater than 0",
            ]
        );
    }

    #[test]
    fn test_empty_medications_short_circuits() {
        let result = validate_medications(&[]);
        assert!(!result.valid);
        assert_eq!(result.errors, vec![EMPTY_MEDICATIONS_MESSAGE]);
    }

    #[test]
    fn test_medication_without_code_reports_each_missing_field() {
        let result = validate_medications(&[Medication {
            quantity: 2,
            ..Default::default()
        }]);

        assert_eq!(
            result.errors,
            vec![
                "medication 1: product name is required when no registration code is given",
                "medication 1: drug name is required when no registration code is given",
                "medication 1: presentation is required when no registration code is given",
            ]
        );
    }

    #[test]
    fn test_medication_lines_are_numbered() {
        let result = validate_medications(&[
            Medication::registered(1, "12345"),
            Medication {
                quantity: 0,
                registration_code: Some("999".to_string()),
                ..Default::default()
            },
        ]);

        assert_eq!(
            result.errors,
            vec!["medication 2: quantity is required and must be greater than 0"]
        );
    }

    #[test]
    fn test_described_medication_is_valid() {
        let result = validate_medications(&[Medication::described(
            1,
            "Amoxidal",
            "amoxicilina",
            "comprimidos 500 mg x 16",
        )]);
        assert!(result.valid);
    }

    #[test]
    fn test_empty_registration_code_requires_description() {
        let result = validate_medications(&[Medication {
            quantity: 1,
            registration_code: Some(String::new()),
            product_name: Some("Amoxidal".to_string()),
            drug_name: None,
            presentation: Some("comprimidos".to_string()),
        }]);

        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("drug name"));
    }

    #[test]
    fn test_request_concatenates_in_group_order() {
        let mut p = patient();
        p.surname = String::new();
        let mut d = doctor();
        d.license.number = String::new();
        let request = PrescriptionRequest::new(p, d, vec![]);

        let result = validate_request(&request);

        assert_eq!(
            result.errors,
            vec![
                "patient surname is required (1-50 characters)",
                "doctor license number is required",
                EMPTY_MEDICATIONS_MESSAGE,
            ]
        );
    }

    #[test]
    fn test_merge_keeps_validity_consistent() {
        let ok = ValidationResult::from_errors(vec![]);
        let bad = ValidationResult::from_errors(vec!["x".to_string()]);

        assert!(ok.clone().merge(ok.clone()).valid);
        assert!(!ok.merge(bad).valid);
    }
}
