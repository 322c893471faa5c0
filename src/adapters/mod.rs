//! External system integrations for Receta.
//!
//! - [`prescription_api`] - Transport to the Innovamed prescription endpoint
//! - [`proxy`] - CORS forwarder for browser clients
//!
//! # Design Pattern
//!
//! The submission service depends on the
//! [`PrescriptionApi`](prescription_api::PrescriptionApi) trait rather than
//! on reqwest directly, so tests can substitute an in-memory transport.
//!
//! ```rust,no_run
//! use receta::adapters::prescription_api::HttpPrescriptionApi;
//! use receta::config::ApiConfig;
//! use receta::core::submission::PrescriptionService;
//! use std::sync::Arc;
//!
//! # fn example() -> receta::domain::Result<()> {
//! let config = ApiConfig {
//!     endpoint_url: "http://127.0.0.1:3001/api/prescription".to_string(),
//!     client_app_id: 12,
//!     timeout_seconds: Some(30),
//! };
//!
//! let api = HttpPrescriptionApi::new(&config)?;
//! let service = PrescriptionService::new(Arc::new(api), config.client_app_id);
//! # Ok(())
//! # }
//! ```

pub mod prescription_api;
pub mod proxy;
