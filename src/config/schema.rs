//! Configuration schema types
//!
//! This module defines the configuration structure for Receta.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use url::Url;

/// Homologation endpoint of the Innovamed prescription API
pub const DEFAULT_UPSTREAM_URL: &str = "https://apirecipe.hml.qbitos.com/apirecipe/Receta";

/// Default listen address of the CORS forwarder
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3001";

/// Main Receta configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecetaConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Prescription API settings
    pub api: ApiConfig,

    /// CORS forwarder settings
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RecetaConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.proxy.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Prescription API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// URL prescriptions are POSTed to (the upstream, or a local forwarder)
    pub endpoint_url: String,

    /// Client application id assigned by Innovamed, stamped on every request
    pub client_app_id: i64,

    /// Request timeout; no timeout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url("api.endpoint_url", &self.endpoint_url)?;

        if self.client_app_id < 0 {
            return Err(format!(
                "api.client_app_id must be >= 0, got {}",
                self.client_app_id
            ));
        }

        if self.timeout_seconds == Some(0) {
            return Err("api.timeout_seconds must be > 0 when set".to_string());
        }

        Ok(())
    }
}

/// CORS forwarder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Socket address the forwarder listens on
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// URL requests are relayed to
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,
}

impl ProxyConfig {
    /// Validates the forwarder settings
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address or upstream URL is invalid
    pub fn validate(&self) -> Result<(), String> {
        self.listen_addr.parse::<SocketAddr>().map_err(|e| {
            format!(
                "Invalid proxy.listen_addr '{}': {}",
                self.listen_addr, e
            )
        })?;

        validate_http_url("proxy.upstream_url", &self.upstream_url)?;
        Ok(())
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            upstream_url: default_upstream_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    let url = Url::parse(value).map_err(|e| format!("Invalid {field} '{value}': {e}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("{field} must start with http:// or https://"));
    }

    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
