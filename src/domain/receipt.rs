//! Successful prescription submission result

use serde::{Deserialize, Serialize};

/// Identifier reported when the upstream body carries neither `recetaId` nor `id`
pub const UNKNOWN_PRESCRIPTION_ID: &str = "unknown";

/// Outcome of an accepted prescription
///
/// The prescription id is taken from the upstream `recetaId` field, falling
/// back to `id`, falling back to [`UNKNOWN_PRESCRIPTION_ID`]. Callers that
/// need a usable id should check [`PrescriptionReceipt::has_upstream_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionReceipt {
    /// Prescription identifier assigned by the upstream API
    #[serde(rename = "recetaId")]
    pub prescription_id: String,

    /// Optional message returned by the upstream API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Full response body as returned by the upstream API
    pub data: serde_json::Value,
}

impl PrescriptionReceipt {
    /// Builds a receipt from a parsed 2xx response body
    pub fn from_body(body: serde_json::Value) -> Self {
        let prescription_id = id_field(&body, "recetaId")
            .or_else(|| id_field(&body, "id"))
            .unwrap_or_else(|| UNKNOWN_PRESCRIPTION_ID.to_string());

        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string);

        Self {
            prescription_id,
            message,
            data: body,
        }
    }

    /// Whether the id came from the upstream body rather than the fallback sentinel
    pub fn has_upstream_id(&self) -> bool {
        self.prescription_id != UNKNOWN_PRESCRIPTION_ID
    }
}

/// Reads an identifier field that may be a non-empty string or a number
fn id_field(body: &serde_json::Value, key: &str) -> Option<String> {
    match body.get(key)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
