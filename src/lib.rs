// Receta - Electronic prescription submission client
// Copyright (c) 2025 Receta Contributors
// Licensed under the MIT License

//! # Receta - Electronic prescription submission
//!
//! Receta validates, sanitizes and submits electronic prescriptions to the
//! Innovamed "Generar Receta" API, and ships a CORS forwarder so browser
//! clients can reach that API.
//!
//! ## Overview
//!
//! This library provides:
//! - **Validating** prescription requests, collecting every violation in one pass
//! - **Sanitizing** phone and license numbers to bare digits
//! - **Submitting** requests and translating every failure into one typed error
//! - **Templates** with canned requests per insurer
//! - **Forwarding** browser requests to the upstream with CORS headers
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Validation, sanitization, submission, templates
//! - [`adapters`] - Prescription API transport and the CORS forwarder
//! - [`domain`] - Request, receipt and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use receta::config::load_config;
//! use receta::core::submission::PrescriptionService;
//! use receta::core::templates::sample_request;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("receta.toml")?;
//!     let service = PrescriptionService::from_config(&config.api)?;
//!
//!     let receipt = service.generate_prescription(&sample_request()).await?;
//!     println!("Prescription {}", receipt.prescription_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Submission failures are reported as [`domain::PrescriptionError`]; each
//! variant carries a status code and a structured detail payload:
//!
//! ```rust,no_run
//! use receta::domain::{PrescriptionError, PrescriptionRequest};
//! use receta::core::submission::PrescriptionService;
//!
//! # async fn example(service: PrescriptionService, request: PrescriptionRequest) {
//! match service.generate_prescription(&request).await {
//!     Ok(receipt) => println!("{}", receipt.prescription_id),
//!     Err(PrescriptionError::Validation { errors }) => {
//!         for e in errors {
//!             eprintln!("{e}");
//!         }
//!     }
//!     Err(e) => eprintln!("{} ({})", e, e.status_code()),
//! }
//! # }
//! ```
//!
//! Everything else (configuration, logging, the forwarder) uses
//! [`domain::RecetaError`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
