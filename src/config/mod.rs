//! Configuration management for Receta.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Receta uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RECETA_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use receta::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("receta.toml")?;
//!
//! println!("Endpoint: {}", config.api.endpoint_url);
//! println!("Client app id: {}", config.api.client_app_id);
//! println!("Forwarder: {} -> {}", config.proxy.listen_addr, config.proxy.upstream_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ApiConfig`] - Prescription endpoint, client app id, optional timeout
//! - [`ProxyConfig`] - CORS forwarder listen address and upstream
//! - [`LoggingConfig`] - Local JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! endpoint_url = "http://127.0.0.1:3001/api/prescription"
//! client_app_id = ${RECETA_CLIENT_APP_ID}
//!
//! [proxy]
//! listen_addr = "127.0.0.1:3001"
//! upstream_url = "https://apirecipe.hml.qbitos.com/apirecipe/Receta"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! Substitution is textual: placeholders for numeric values are written
//! without quotes so the substituted value parses as an integer.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApiConfig, ApplicationConfig, LoggingConfig, ProxyConfig, RecetaConfig, DEFAULT_LISTEN_ADDR,
    DEFAULT_UPSTREAM_URL,
};
