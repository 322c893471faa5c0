//! Prescription API transport
//!
//! The submission service talks to the upstream through the
//! [`PrescriptionApi`] trait so that it can be exercised against an
//! in-memory double. [`HttpPrescriptionApi`] is the reqwest-backed
//! implementation used in production.

mod client;

pub use client::HttpPrescriptionApi;

use async_trait::async_trait;
use thiserror::Error;

/// Raw upstream answer: status code and undecoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    /// HTTP status code returned by the upstream
    pub status: u16,

    /// Response body as text
    pub body: String,
}

impl UpstreamReply {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to complete a round-trip with the upstream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The upstream could not be reached or the connection broke mid-exchange
    #[error("{0}")]
    Connection(String),

    /// The request could not be built or sent for any other reason
    #[error("{0}")]
    Unknown(String),
}

/// Sends a JSON-encoded prescription to the upstream API
///
/// Implementations perform exactly one outbound call per invocation and
/// must not retry. Non-2xx answers are not errors at this level: they are
/// returned as an [`UpstreamReply`] for the caller to interpret.
///
/// # Example
///
/// ```no_run
/// use receta::adapters::prescription_api::{HttpPrescriptionApi, PrescriptionApi};
/// use receta::config::ApiConfig;
///
/// # async fn example() -> receta::domain::Result<()> {
/// let config = ApiConfig {
///     endpoint_url: "https://apirecipe.hml.qbitos.com/apirecipe/Receta".to_string(),
///     client_app_id: 12,
///     timeout_seconds: None,
/// };
/// let api = HttpPrescriptionApi::new(&config)?;
///
/// let reply = api.post_prescription(r#"{"paciente":{}}"#.to_string()).await;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PrescriptionApi: Send + Sync {
    /// POST `body` as `application/json` and return the upstream answer
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connection`] if the upstream cannot be
    /// reached or the response body cannot be read.
    async fn post_prescription(&self, body: String) -> Result<UpstreamReply, TransportError>;

    /// URL the prescriptions are sent to
    fn endpoint_url(&self) -> &str;
}
