//! reqwest implementation of the prescription API transport

use super::{PrescriptionApi, TransportError, UpstreamReply};
use crate::config::ApiConfig;
use crate::domain::{RecetaError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, ClientBuilder};
use std::time::Duration;

/// HTTP transport for the Innovamed prescription endpoint
///
/// Holds one reqwest client, so the connection pool is shared by every
/// submission made through this instance.
#[derive(Debug, Clone)]
pub struct HttpPrescriptionApi {
    endpoint_url: String,
    client: Client,
}

impl HttpPrescriptionApi {
    /// Create a transport for the configured endpoint
    ///
    /// No request timeout is applied unless `timeout_seconds` is set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| RecetaError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(config.endpoint_url.clone(), client))
    }

    /// Create a transport around an existing client
    pub fn with_client(endpoint_url: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            client,
        }
    }
}

#[async_trait]
impl PrescriptionApi for HttpPrescriptionApi {
    async fn post_prescription(&self, body: String) -> std::result::Result<UpstreamReply, TransportError> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        tracing::debug!(
            endpoint = %self.endpoint_url,
            status = status,
            bytes = body.len(),
            "Prescription API responded"
        );

        Ok(UpstreamReply { status, body })
    }

    fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

/// Builder errors (malformed URL and the like) are not connectivity problems
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Unknown(err.to_string())
    } else {
        TransportError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> ApiConfig {
        ApiConfig {
            endpoint_url: url.to_string(),
            client_app_id: 1,
            timeout_seconds: Some(5),
        }
    }

    #[tokio::test]
    async fn test_relays_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/apirecipe/Receta")
            .match_header("content-type", "application/json")
            .match_body(r#"{"a":1}"#)
            .with_status(422)
            .with_body(r#"{"message":"duplicate"}"#)
            .create_async()
            .await;

        let url = format!("{}/apirecipe/Receta", server.url());
        let api = HttpPrescriptionApi::new(&config(&url)).unwrap();
        let reply = api.post_prescription(r#"{"a":1}"#.to_string()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply.status, 422);
        assert!(!reply.is_success());
        assert_eq!(reply.body, r#"{"message":"duplicate"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let api = HttpPrescriptionApi::new(&config(&format!("http://127.0.0.1:{port}/"))).unwrap();
        let err = api.post_prescription("{}".to_string()).await.unwrap_err();

        assert!(matches!(err, TransportError::Connection(_)));
    }

    #[tokio::test]
    async fn test_malformed_url_is_unknown_error() {
        let api = HttpPrescriptionApi::new(&config("not a url")).unwrap();
        let err = api.post_prescription("{}".to_string()).await.unwrap_err();

        assert!(matches!(err, TransportError::Unknown(_)));
    }

    #[test]
    fn test_endpoint_url() {
        let api = HttpPrescriptionApi::new(&config("http://localhost/receta")).unwrap();
        assert_eq!(api.endpoint_url(), "http://localhost/receta");
    }
}
