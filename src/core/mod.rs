//! Core business logic for Receta.
//!
//! # Modules
//!
//! - [`validation`] - Field and group validators for prescription requests
//! - [`sanitize`] - Digits-only normalization of phone and license numbers
//! - [`submission`] - The submission service: validate, sanitize, transmit, interpret
//! - [`templates`] - Built-in canned requests, one per insurer
//!
//! # Submission Workflow
//!
//! 1. **Validate**: patient, doctor and medication checks; all violations are collected
//! 2. **Sanitize**: a copy of the request is normalized and stamped with the client app id
//! 3. **Transmit**: one POST to the configured endpoint, no retries
//! 4. **Interpret**: 2xx becomes a receipt, anything else a typed error
//!
//! # Example
//!
//! ```rust,no_run
//! use receta::config::load_config;
//! use receta::core::submission::PrescriptionService;
//! use receta::core::templates::find_template;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("receta.toml")?;
//! let service = PrescriptionService::from_config(&config.api)?;
//!
//! let template = find_template("osde").ok_or("no such template")?;
//! let receipt = service.generate_prescription(&(template.create)()).await?;
//!
//! println!("Prescription: {}", receipt.prescription_id);
//! # Ok(())
//! # }
//! ```

pub mod sanitize;
pub mod submission;
pub mod templates;
pub mod validation;
