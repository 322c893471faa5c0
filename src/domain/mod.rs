//! Domain models and types for Receta.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Prescription request model** ([`PrescriptionRequest`], [`Patient`], [`Doctor`],
//!   [`Medication`]) serialized with the upstream API's field names
//! - **Closed code sets** ([`DocumentType`], [`Sex`], [`LicenseType`])
//! - **Success value** ([`PrescriptionReceipt`])
//! - **Error types** ([`RecetaError`], [`PrescriptionError`])
//! - **Result type alias** ([`Result`])
//!
//! # Building a request
//!
//! ```rust
//! use receta::domain::{
//!     Doctor, DoctorLicense, DocumentType, Medication, Patient, PrescriptionRequest, Sex,
//! };
//!
//! let request = PrescriptionRequest::new(
//!     Patient::new("González", "Ana", DocumentType::NationalId, "30567890", "2001-07-02", Sex::Female),
//!     Doctor::new(
//!         "Pérez",
//!         "Juan",
//!         DocumentType::NationalId,
//!         "25123456",
//!         Sex::Male,
//!         DoctorLicense::provincial("123456", "Buenos Aires"),
//!     ),
//!     vec![Medication::registered(2, "12345")],
//! );
//! assert_eq!(request.medications.len(), 1);
//! ```

pub mod errors;
pub mod prescription;
pub mod receipt;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{PrescriptionError, RecetaError, DEFAULT_API_ERROR_MESSAGE};
pub use prescription::{
    AttentionAddress, Coverage, Doctor, DoctorLicense, DocumentType, Letterhead, LicenseType,
    Medication, Patient, PatientAddress, PlaceOfAttention, PostdatedPrescriptions,
    PrescriptionRequest, Sex,
};
pub use receipt::{PrescriptionReceipt, UNKNOWN_PRESCRIPTION_ID};
pub use result::Result;
