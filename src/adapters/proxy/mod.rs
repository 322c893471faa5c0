//! CORS forwarder
//!
//! Lets browser clients reach the prescription API, which does not send
//! CORS headers itself. Every path is handled the same way, with `/` and
//! `/api/prescription` as the documented entry points:
//!
//! - `OPTIONS` answers the preflight with `204 No Content`
//! - `POST` relays the body unchanged to the upstream and returns the
//!   upstream status and body verbatim
//! - any other method gets `405 Method not allowed`
//!
//! A failure while relaying is reported as a `500` JSON body of the form
//! `{"success": false, "error": "Proxy error", "message": ...}`.
//!
//! # Example
//!
//! ```no_run
//! use receta::adapters::proxy;
//! use receta::config::ProxyConfig;
//! use tokio::sync::watch;
//!
//! # async fn example() -> receta::domain::Result<()> {
//! let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//! proxy::serve(&ProxyConfig::default(), shutdown_rx).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::ProxyConfig;
use crate::domain::{RecetaError, Result};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE,
};
use axum::http::{HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::watch;

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";
const PREFLIGHT_MAX_AGE: &str = "86400";

/// Relays prescription requests to a fixed upstream URL
#[derive(Debug, Clone)]
pub struct Forwarder {
    upstream_url: String,
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder for `upstream_url`
    ///
    /// # Errors
    ///
    /// Returns a proxy error if the HTTP client cannot be built.
    pub fn new(upstream_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RecetaError::Proxy(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            upstream_url: upstream_url.into(),
            client,
        })
    }

    /// URL every POST is relayed to
    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    async fn relay(&self, body: Bytes) -> std::result::Result<(StatusCode, Bytes), String> {
        let response = self
            .client
            .post(&self.upstream_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = StatusCode::from_u16(response.status().as_u16()).map_err(|e| e.to_string())?;
        let body = response.bytes().await.map_err(|e| e.to_string())?;

        Ok((status, body))
    }
}

/// Build the forwarder routes
pub fn router(forwarder: Forwarder) -> Router {
    Router::new()
        .route("/", any(handle))
        .route("/api/prescription", any(handle))
        .fallback(handle)
        .with_state(Arc::new(forwarder))
}

/// Bind the configured address and serve until `shutdown` turns true
///
/// # Errors
///
/// Returns a proxy error if the address cannot be parsed or bound, or if
/// the server fails.
pub async fn serve(config: &ProxyConfig, shutdown: watch::Receiver<bool>) -> Result<()> {
    let addr: SocketAddr = config.listen_addr.parse().map_err(|e| {
        RecetaError::Proxy(format!("Invalid listen address {}: {e}", config.listen_addr))
    })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| RecetaError::Proxy(format!("Failed to bind {addr}: {e}")))?;

    serve_on(listener, Forwarder::new(config.upstream_url.clone())?, shutdown).await
}

/// Serve on an already bound listener until `shutdown` turns true
///
/// # Errors
///
/// Returns a proxy error if the server fails.
pub async fn serve_on(
    listener: TcpListener,
    forwarder: Forwarder,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let local_addr = listener.local_addr()?;
    tracing::info!(
        listen_addr = %local_addr,
        upstream_url = %forwarder.upstream_url(),
        "CORS forwarder listening"
    );

    let shutdown_signal = async move {
        while !*shutdown.borrow() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }
        tracing::info!("CORS forwarder shutting down");
    };

    axum::serve(listener, router(forwarder))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| RecetaError::Proxy(format!("Server error: {e}")))
}

async fn handle(
    State(forwarder): State<Arc<Forwarder>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    match method {
        Method::OPTIONS => preflight(),
        Method::POST => forward(&forwarder, uri, body).await,
        _ => {
            tracing::debug!(method = %method, path = %uri.path(), "Rejected method");
            method_not_allowed()
        }
    }
}

async fn forward(forwarder: &Forwarder, uri: Uri, body: Bytes) -> Response {
    let started = Instant::now();
    tracing::debug!(bytes = body.len(), "Forwarding request upstream");

    match forwarder.relay(body).await {
        Ok((status, upstream_body)) => {
            crate::log_forwarded!(Method::POST, uri.path(), status.as_u16(), started.elapsed());
            (status, cors_headers(), Body::from(upstream_body)).into_response()
        }
        Err(message) => {
            tracing::error!(
                upstream_url = %forwarder.upstream_url(),
                error = %message,
                "Forwarding failed"
            );
            proxy_error(message)
        }
    }
}

fn cors_headers() -> [(HeaderName, &'static str); 4] {
    [
        (CONTENT_TYPE, "application/json"),
        (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
        (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
    ]
}

fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE),
        ],
    )
        .into_response()
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        "Method not allowed",
    )
        .into_response()
}

fn proxy_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
        Json(json!({
            "success": false,
            "error": "Proxy error",
            "message": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use tower::ServiceExt;

    fn request(method: &str, path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/apirecipe/Receta")
    }

    #[tokio::test]
    async fn test_preflight() {
        let app = router(Forwarder::new(unreachable_url()).unwrap());

        let response = app.oneshot(request("OPTIONS", "/", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "POST, OPTIONS");
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "Content-Type");
        assert_eq!(headers.get(ACCESS_CONTROL_MAX_AGE).unwrap(), "86400");
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_other_methods_are_rejected() {
        for method in ["GET", "PUT", "DELETE"] {
            let app = router(Forwarder::new(unreachable_url()).unwrap());
            let response = app
                .oneshot(request(method, "/api/prescription", ""))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                "*"
            );
            assert_eq!(body_text(response).await, "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_post_relays_upstream_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/apirecipe/Receta")
            .match_header("content-type", "application/json")
            .match_body(r#"{"clienteAppId":12}"#)
            .with_status(201)
            .with_body(r#"{"recetaId":"RX-001"}"#)
            .create_async()
            .await;

        let forwarder = Forwarder::new(format!("{}/apirecipe/Receta", server.url())).unwrap();
        let response = router(forwarder)
            .oneshot(request("POST", "/api/prescription", r#"{"clienteAppId":12}"#))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(body_text(response).await, r#"{"recetaId":"RX-001"}"#);
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_relayed_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(422)
            .with_body(r#"{"message":"duplicate"}"#)
            .create_async()
            .await;

        let forwarder = Forwarder::new(format!("{}/", server.url())).unwrap();
        let response = router(forwarder)
            .oneshot(request("POST", "/", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_text(response).await, r#"{"message":"duplicate"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_yields_proxy_error() {
        let app = router(Forwarder::new(unreachable_url()).unwrap());

        let response = app
            .oneshot(request("POST", "/api/prescription", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Proxy error");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn test_preflight_on_any_path() {
        let app = router(Forwarder::new(unreachable_url()).unwrap());
        let response = app.oneshot(request("OPTIONS", "/Receta", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[ACCESS_CONTROL_MAX_AGE], PREFLIGHT_MAX_AGE);
    }

    #[tokio::test]
    async fn test_other_paths_keep_cors_headers() {
        let app = router(Forwarder::new(unreachable_url()).unwrap());

        let response = app
            .clone()
            .oneshot(request("GET", "/other", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let response = app.oneshot(request("POST", "/other", "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
