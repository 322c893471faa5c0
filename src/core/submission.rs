//! Prescription submission service
//!
//! Orchestrates one submission: validate, sanitize, transmit, interpret.
//! Every failure path ends in exactly one [`PrescriptionError`].

use crate::adapters::prescription_api::{
    HttpPrescriptionApi, PrescriptionApi, TransportError, UpstreamReply,
};
use crate::config::ApiConfig;
use crate::core::sanitize::sanitize_request;
use crate::core::validation::validate_request;
use crate::domain::{PrescriptionError, PrescriptionReceipt, PrescriptionRequest, Result};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Submits prescriptions to the upstream API
///
/// The service holds no mutable state. It is cheap to clone and can be
/// shared across tasks; concurrent submissions proceed independently.
///
/// # Example
///
/// ```no_run
/// use receta::config::load_config;
/// use receta::core::submission::PrescriptionService;
/// use receta::core::templates::sample_request;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("receta.toml")?;
/// let service = PrescriptionService::from_config(&config.api)?;
///
/// match service.generate_prescription(&sample_request()).await {
///     Ok(receipt) => println!("Prescription {}", receipt.prescription_id),
///     Err(e) => eprintln!("{} ({})", e, e.status_code()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PrescriptionService {
    api: Arc<dyn PrescriptionApi>,
    client_app_id: i64,
}

impl PrescriptionService {
    /// Create a service over an explicit transport
    ///
    /// `client_app_id` is stamped on every outbound request, replacing
    /// whatever value the caller supplied.
    pub fn new(api: Arc<dyn PrescriptionApi>, client_app_id: i64) -> Self {
        Self { api, client_app_id }
    }

    /// Create a service using the HTTP transport described by `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let api = HttpPrescriptionApi::new(config)?;
        Ok(Self::new(Arc::new(api), config.client_app_id))
    }

    /// Client application id stamped on outbound requests
    pub fn client_app_id(&self) -> i64 {
        self.client_app_id
    }

    /// Validate, sanitize and submit a prescription
    ///
    /// The network is not contacted when validation fails. Exactly one
    /// outbound call is made otherwise; there are no retries.
    ///
    /// # Errors
    ///
    /// * [`PrescriptionError::Validation`] - the request failed local validation
    /// * [`PrescriptionError::Api`] - the upstream answered with a non-2xx status
    /// * [`PrescriptionError::Connection`] - the upstream could not be reached
    /// * [`PrescriptionError::Unknown`] - the response body was not JSON, or
    ///   the request could not be encoded
    pub async fn generate_prescription(
        &self,
        request: &PrescriptionRequest,
    ) -> std::result::Result<PrescriptionReceipt, PrescriptionError> {
        let span = tracing::info_span!(
            "generate_prescription",
            submission_id = %Uuid::new_v4(),
            endpoint = %self.api.endpoint_url(),
        );

        self.submit(request).instrument(span).await
    }

    async fn submit(
        &self,
        request: &PrescriptionRequest,
    ) -> std::result::Result<PrescriptionReceipt, PrescriptionError> {
        let validation = validate_request(request);
        if !validation.valid {
            tracing::warn!(
                errors = validation.errors.len(),
                "Prescription request failed validation"
            );
            return Err(PrescriptionError::Validation {
                errors: validation.errors,
            });
        }

        let sanitized = sanitize_request(request, self.client_app_id);
        let body = serde_json::to_string(&sanitized).map_err(|e| PrescriptionError::Unknown {
            message: format!("failed to encode prescription request: {e}"),
        })?;

        tracing::info!(
            medications = sanitized.medications.len(),
            client_app_id = self.client_app_id,
            "Submitting prescription"
        );

        let reply = self.api.post_prescription(body).await.map_err(|e| {
            tracing::error!(error = %e, "Prescription API transport failure");
            match e {
                TransportError::Connection(message) => PrescriptionError::Connection { message },
                TransportError::Unknown(message) => PrescriptionError::Unknown { message },
            }
        })?;

        interpret_reply(reply)
    }
}

/// Turns the upstream answer into a receipt or an API error
fn interpret_reply(
    reply: UpstreamReply,
) -> std::result::Result<PrescriptionReceipt, PrescriptionError> {
    let body: serde_json::Value = serde_json::from_str(&reply.body).map_err(|e| {
        tracing::error!(
            status = reply.status,
            error = %e,
            "Prescription API returned a non-JSON body"
        );
        PrescriptionError::Unknown {
            message: format!("invalid JSON in prescription API response: {e}"),
        }
    })?;

    if !reply.is_success() {
        let err = PrescriptionError::from_upstream(reply.status, body);
        tracing::warn!(status = reply.status, error = %err, "Prescription rejected by API");
        return Err(err);
    }

    let receipt = PrescriptionReceipt::from_body(body);
    if receipt.has_upstream_id() {
        tracing::info!(
            status = reply.status,
            prescription_id = %receipt.prescription_id,
            "Prescription generated"
        );
    } else {
        tracing::warn!(
            status = reply.status,
            "Prescription accepted but the response carried no recetaId or id"
        );
    }

    Ok(receipt)
}
