//! Domain error types
//!
//! This module defines the error hierarchy for Receta. All errors are
//! domain-specific and don't expose third-party types.

use serde_json::json;
use thiserror::Error;

/// Fallback message when a rejected submission carries no `message` field
pub const DEFAULT_API_ERROR_MESSAGE: &str = "failed to generate prescription";

/// Main Receta error type
///
/// This is the application-level error type used by configuration loading,
/// logging setup, the forwarder and the CLI.
#[derive(Debug, Error)]
pub enum RecetaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Prescription submission errors
    #[error(transparent)]
    Prescription(#[from] PrescriptionError),

    /// CORS forwarder errors
    #[error("Proxy error: {0}")]
    Proxy(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Failure of a prescription submission
///
/// Every failure path of the submission service produces exactly one of
/// these. Each variant maps to a status code: 400 for local validation, the
/// upstream status for rejections, 0 for transport failures and 500 for
/// anything else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrescriptionError {
    /// The request failed local validation; the network was not contacted
    #[error("prescription request failed validation ({} error(s))", .errors.len())]
    Validation { errors: Vec<String> },

    /// The upstream API answered with a non-2xx status
    #[error("prescription API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        details: serde_json::Value,
    },

    /// The upstream API could not be reached
    #[error("connection error: {message}")]
    Connection { message: String },

    /// Any other failure
    #[error("unknown error: {message}")]
    Unknown { message: String },
}

impl PrescriptionError {
    /// Status code associated with this failure
    pub fn status_code(&self) -> u16 {
        match self {
            PrescriptionError::Validation { .. } => 400,
            PrescriptionError::Api { status, .. } => *status,
            PrescriptionError::Connection { .. } => 0,
            PrescriptionError::Unknown { .. } => 500,
        }
    }

    /// Structured detail payload for this failure
    pub fn details(&self) -> serde_json::Value {
        match self {
            PrescriptionError::Validation { errors } => json!({ "validationErrors": errors }),
            PrescriptionError::Api { details, .. } => details.clone(),
            PrescriptionError::Connection { message } | PrescriptionError::Unknown { message } => {
                json!({ "originalError": message })
            }
        }
    }

    /// Whether the request was rejected locally before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, PrescriptionError::Validation { .. })
    }

    /// Whether the upstream API rejected the request
    pub fn is_api(&self) -> bool {
        matches!(self, PrescriptionError::Api { .. })
    }

    /// Builds an API error from a non-2xx status and its parsed body
    pub fn from_upstream(status: u16, body: serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_API_ERROR_MESSAGE)
            .to_string();

        PrescriptionError::Api {
            status,
            message,
            details: body,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RecetaError {
    fn from(err: std::io::Error) -> Self {
        RecetaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RecetaError {
    fn from(err: serde_json::Error) -> Self {
        RecetaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RecetaError {
    fn from(err: toml::de::Error) -> Self {
        RecetaError::Configuration(format!("TOML parse error: {err}"))
    }
}
