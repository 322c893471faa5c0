//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Console output
//! - Local JSON file logging with rotation
//!
//! Request bodies carry patient data and are never logged.
//!
//! # Example
//!
//! ```no_run
//! use receta::logging::init_logging;
//! use receta::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log one request relayed by the CORS forwarder
///
/// # Example
///
/// ```no_run
/// use receta::log_forwarded;
/// use std::time::Duration;
///
/// log_forwarded!("POST", "/api/prescription", 201, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_forwarded {
    ($method:expr, $path:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            method = %$method,
            path = %$path,
            status = $status,
            duration_ms = $duration.as_millis() as u64,
            "Forwarded request"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use receta::log_error_with_context;
/// use receta::domain::RecetaError;
///
/// let error = RecetaError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
