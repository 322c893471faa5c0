//! Built-in prescription templates
//!
//! Each template builds a complete, valid request for the same demo patient,
//! doctor and medication, differing only in the insurance coverage block.

use crate::domain::{
    Coverage, Doctor, DoctorLicense, DocumentType, Medication, Patient, PrescriptionRequest, Sex,
};

/// Affiliate number shown for templates without coverage
pub const NO_AFFILIATE: &str = "N/A";

/// A named, canned prescription request
#[derive(Debug, Clone, Copy)]
pub struct PrescriptionTemplate {
    /// Stable identifier, e.g. `osde`
    pub id: &'static str,

    /// Display name of the insurer
    pub name: &'static str,

    /// Affiliate (policy) number, or [`NO_AFFILIATE`]
    pub affiliate_number: &'static str,

    /// Builds a fresh request from this template
    pub create: fn() -> PrescriptionRequest,
}

/// Lists the built-in templates in display order
pub fn prescription_templates() -> Vec<PrescriptionTemplate> {
    vec![
        PrescriptionTemplate {
            id: "osde",
            name: "OSDE",
            affiliate_number: "23200126801",
            create: osde_request,
        },
        PrescriptionTemplate {
            id: "luis-pasteur",
            name: "Luis Pasteur",
            affiliate_number: "42731800060",
            create: luis_pasteur_request,
        },
        PrescriptionTemplate {
            id: "accord-salud",
            name: "Accord Salud",
            affiliate_number: "23256785",
            create: accord_salud_request,
        },
        PrescriptionTemplate {
            id: "private",
            name: "Particular (Sin obra social)",
            affiliate_number: NO_AFFILIATE,
            create: sample_request,
        },
    ]
}

/// Looks up a template by id
///
/// # Example
///
/// ```rust
/// use receta::core::templates::find_template;
///
/// let template = find_template("osde").unwrap();
/// let request = (template.create)();
/// assert!(request.patient.coverage.is_some());
/// assert!(find_template("ioma").is_none());
/// ```
pub fn find_template(id: &str) -> Option<PrescriptionTemplate> {
    prescription_templates().into_iter().find(|t| t.id == id)
}

/// The base request: demo patient, doctor and medication, no coverage
pub fn sample_request() -> PrescriptionRequest {
    PrescriptionRequest::new(base_patient(), base_doctor(), vec![base_medication()])
}

fn osde_request() -> PrescriptionRequest {
    covered_request("OSDE", "23200126801")
}

fn luis_pasteur_request() -> PrescriptionRequest {
    covered_request("Luis Pasteur", "42731800060")
}

fn accord_salud_request() -> PrescriptionRequest {
    covered_request("Accord Salud", "23256785")
}

// The insurer id is the display name until real Innovamed insurer ids are wired in.
fn covered_request(insurer: &str, policy_number: &str) -> PrescriptionRequest {
    let mut request = sample_request();
    request.patient.coverage = Some(Coverage::new(insurer, policy_number));
    request
}

fn base_patient() -> Patient {
    Patient::new(
        "González",
        "Ana",
        DocumentType::NationalId,
        "30567890",
        "2001-07-02",
        Sex::Female,
    )
    .with_email("ana.gonzalez@example.com")
    .with_phone("5491134567890")
}

fn base_doctor() -> Doctor {
    Doctor::new(
        "Pérez",
        "Juan",
        DocumentType::NationalId,
        "25123456",
        Sex::Male,
        DoctorLicense::provincial("123456", "Buenos Aires"),
    )
    .with_email("dr.perez@example.com")
}

fn base_medication() -> Medication {
    Medication::registered(2, "12345")
}
