//! Prescription request domain model
//!
//! These types mirror the payload accepted by the Innovamed "Generar Receta"
//! endpoint. Rust field names are English; the serialized JSON uses the
//! upstream's Spanish camelCase names.
//!
//! Required free-text fields deserialize to an empty string when absent so
//! the validator can report them together with every other violation.
//! Enumerated fields (document type, sex, license type) are required by the
//! type system.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identity document types accepted by the prescription API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Passport
    #[serde(rename = "Pasaporte")]
    Passport,
    /// Documento Nacional de Identidad
    #[serde(rename = "DNI")]
    NationalId,
    /// Libreta de Enrolamiento (legacy)
    #[serde(rename = "LE")]
    LegacyLe,
    /// Libreta Cívica (legacy)
    #[serde(rename = "LC")]
    LegacyLc,
    /// Cédula de Identidad
    #[serde(rename = "CI")]
    CivilId,
}

impl DocumentType {
    /// Wire code used by the upstream API
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::Passport => "Pasaporte",
            DocumentType::NationalId => "DNI",
            DocumentType::LegacyLe => "LE",
            DocumentType::LegacyLc => "LC",
            DocumentType::CivilId => "CI",
        }
    }

    /// Inclusive document-number length bounds for this document type
    pub fn length_bounds(&self) -> (usize, usize) {
        match self {
            DocumentType::NationalId => (4, 9),
            DocumentType::Passport => (5, 12),
            DocumentType::LegacyLe | DocumentType::LegacyLc => (1, 16),
            DocumentType::CivilId => (6, 9),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Sex codes accepted by the prescription API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "X")]
    NonBinary,
    #[serde(rename = "O")]
    Other,
}

/// Professional license (matrícula) jurisdiction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseType {
    /// Matrícula provincial; requires the issuing province
    #[serde(rename = "MP")]
    Provincial,
    /// Matrícula nacional
    #[serde(rename = "MN")]
    National,
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseType::Provincial => f.write_str("MP"),
            LicenseType::National => f.write_str("MN"),
        }
    }
}

/// Patient home address (domicilio)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientAddress {
    #[serde(rename = "calle", default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(rename = "numero", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(rename = "piso", default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(rename = "dpto", default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    #[serde(rename = "codigoPostal", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "localidad", default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(rename = "municipio", default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(rename = "provincia", default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(rename = "pais", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "observacion", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Health-insurance affiliation (cobertura)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    /// Insurer identifier (idFinanciador)
    #[serde(rename = "idFinanciador", default, skip_serializing_if = "Option::is_none")]
    pub insurer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(rename = "planId", default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<i64>,
    /// Affiliate / policy number
    #[serde(rename = "numero", default, skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    /// Document number of the policy holder (dniTitular)
    #[serde(rename = "dniTitular", default, skip_serializing_if = "Option::is_none")]
    pub holder_document: Option<String>,
}

impl Coverage {
    /// Coverage block with insurer and affiliate number, as used by the templates
    pub fn new(insurer_id: impl Into<String>, policy_number: impl Into<String>) -> Self {
        Self {
            insurer_id: Some(insurer_id.into()),
            policy_number: Some(policy_number.into()),
            ..Default::default()
        }
    }
}

/// Patient (paciente)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "apellido", default)]
    pub surname: String,
    #[serde(rename = "nombre", default)]
    pub given_name: String,
    #[serde(rename = "tipoDoc")]
    pub document_type: DocumentType,
    #[serde(rename = "nroDoc", default)]
    pub document_number: String,
    /// `YYYY-MM-DD` or `DD/MM/YYYY`
    #[serde(rename = "fechaNacimiento", default)]
    pub birth_date: String,
    #[serde(rename = "sexo")]
    pub sex: Sex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuil: Option<String>,
    #[serde(rename = "localidad", default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(rename = "provincia", default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(rename = "pais", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "cobertura", default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Coverage>,
    #[serde(rename = "domicilio", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<PatientAddress>,
}

impl Patient {
    /// Creates a patient with the required fields and no optional data
    pub fn new(
        surname: impl Into<String>,
        given_name: impl Into<String>,
        document_type: DocumentType,
        document_number: impl Into<String>,
        birth_date: impl Into<String>,
        sex: Sex,
    ) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            document_type,
            document_number: document_number.into(),
            birth_date: birth_date.into(),
            sex,
            cuil: None,
            locality: None,
            province: None,
            country: None,
            email: None,
            phone: None,
            coverage: None,
            address: None,
        }
    }

    /// Sets the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the insurance coverage
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = Some(coverage);
        self
    }
}

/// Doctor license record (matrícula)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorLicense {
    #[serde(rename = "tipo")]
    pub license_type: LicenseType,
    #[serde(rename = "numero", default)]
    pub number: String,
    /// Issuing province; required when `license_type` is provincial
    #[serde(rename = "provincia", default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(rename = "profesion", default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(rename = "especialidad", default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl DoctorLicense {
    /// Provincial license issued by `province`
    pub fn provincial(number: impl Into<String>, province: impl Into<String>) -> Self {
        Self {
            license_type: LicenseType::Provincial,
            number: number.into(),
            province: Some(province.into()),
            profession: None,
            specialty: None,
        }
    }

    /// National license
    pub fn national(number: impl Into<String>) -> Self {
        Self {
            license_type: LicenseType::National,
            number: number.into(),
            province: None,
            profession: None,
            specialty: None,
        }
    }
}

/// Letterhead lines printed on the prescription (sello)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letterhead {
    #[serde(rename = "linea1", default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(rename = "linea2", default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(rename = "linea3", default, skip_serializing_if = "Option::is_none")]
    pub line3: Option<String>,
    #[serde(rename = "linea4", default, skip_serializing_if = "Option::is_none")]
    pub line4: Option<String>,
}

/// Prescribing doctor (medico)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "apellido", default)]
    pub surname: String,
    #[serde(rename = "nombre", default)]
    pub given_name: String,
    #[serde(rename = "tipoDoc")]
    pub document_type: DocumentType,
    #[serde(rename = "nroDoc", default)]
    pub document_number: String,
    #[serde(rename = "sexo")]
    pub sex: Sex,
    #[serde(rename = "matricula")]
    pub license: DoctorLicense,
    #[serde(rename = "fechaNacimiento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "pais", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "firmalink", default, skip_serializing_if = "Option::is_none")]
    pub signature_link: Option<String>,
    #[serde(rename = "firmabase64", default, skip_serializing_if = "Option::is_none")]
    pub signature_base64: Option<String>,
    #[serde(rename = "idTributario", default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(rename = "idREFEPS", default, skip_serializing_if = "Option::is_none")]
    pub refeps_id: Option<String>,
    #[serde(rename = "sello", default, skip_serializing_if = "Option::is_none")]
    pub letterhead: Option<Letterhead>,
}

impl Doctor {
    /// Creates a doctor with the required fields and no optional data
    pub fn new(
        surname: impl Into<String>,
        given_name: impl Into<String>,
        document_type: DocumentType,
        document_number: impl Into<String>,
        sex: Sex,
        license: DoctorLicense,
    ) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            document_type,
            document_number: document_number.into(),
            sex,
            license,
            birth_date: None,
            email: None,
            phone: None,
            country: None,
            signature_link: None,
            signature_base64: None,
            tax_id: None,
            refeps_id: None,
            letterhead: None,
        }
    }

    /// Sets the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// One prescribed medication line
///
/// Either `registration_code` is set, or all of `product_name`, `drug_name`
/// and `presentation` are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Units prescribed; anything below 1 is reported by the validator
    #[serde(rename = "cantidad", default, deserialize_with = "quantity_from_wire")]
    pub quantity: i64,
    #[serde(rename = "regNo", default, skip_serializing_if = "Option::is_none")]
    pub registration_code: Option<String>,
    #[serde(rename = "nombreProducto", default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(rename = "nombreDroga", default, skip_serializing_if = "Option::is_none")]
    pub drug_name: Option<String>,
    #[serde(rename = "presentacion", default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<String>,
}

impl Medication {
    /// Medication identified by its registry code
    pub fn registered(quantity: i64, registration_code: impl Into<String>) -> Self {
        Self {
            quantity,
            registration_code: Some(registration_code.into()),
            ..Default::default()
        }
    }

    /// Medication described by product name, drug and presentation form
    pub fn described(
        quantity: i64,
        product_name: impl Into<String>,
        drug_name: impl Into<String>,
        presentation: impl Into<String>,
    ) -> Self {
        Self {
            quantity,
            registration_code: None,
            product_name: Some(product_name.into()),
            drug_name: Some(drug_name.into()),
            presentation: Some(presentation.into()),
        }
    }
}

/// `null` reads as 0 and fractional values are truncated, so a bad
/// quantity is reported alongside every other violation instead of failing
/// the whole parse
fn quantity_from_wire<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(value
        .and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)))
        .unwrap_or(0))
}

/// Postdated prescriptions (recetasPostadatas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostdatedPrescriptions {
    #[serde(rename = "cantidad")]
    pub count: u32,
    #[serde(rename = "diasAPosdatar")]
    pub days_offset: u32,
}

/// Address of the place of attention
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttentionAddress {
    #[serde(rename = "calle", default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(rename = "numero", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
}

/// Place of attention (lugarAtencion)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOfAttention {
    #[serde(rename = "domicilio", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AttentionAddress>,
}

/// A complete prescription request
///
/// `client_app_id` is overwritten with the configured value when the request
/// is submitted; whatever the caller puts there is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionRequest {
    #[serde(rename = "paciente")]
    pub patient: Patient,
    #[serde(rename = "medico")]
    pub doctor: Doctor,
    #[serde(rename = "medicamentos", default)]
    pub medications: Vec<Medication>,
    #[serde(rename = "clienteAppId", default)]
    pub client_app_id: i64,
    #[serde(rename = "lugarAtencion", default, skip_serializing_if = "Option::is_none")]
    pub place_of_attention: Option<PlaceOfAttention>,
    #[serde(rename = "recetasPostadatas", default, skip_serializing_if = "Option::is_none")]
    pub postdated: Option<PostdatedPrescriptions>,
}

impl PrescriptionRequest {
    /// Creates a request without place of attention or postdated prescriptions
    pub fn new(patient: Patient, doctor: Doctor, medications: Vec<Medication>) -> Self {
        Self {
            patient,
            doctor,
            medications,
            client_app_id: 0,
            place_of_attention: None,
            postdated: None,
        }
    }

    /// Parses a request from its JSON wire representation
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
