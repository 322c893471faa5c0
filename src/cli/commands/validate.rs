//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Receta configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(&e, "Configuration validation failed");
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Prescription Endpoint: {}", config.api.endpoint_url);
        println!("  Client App ID: {}", config.api.client_app_id);
        match config.api.timeout_seconds {
            Some(secs) => println!("  Request Timeout: {secs}s"),
            None => println!("  Request Timeout: none"),
        }
        println!("  Forwarder Listen Address: {}", config.proxy.listen_addr);
        println!("  Forwarder Upstream: {}", config.proxy.upstream_url);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();

        Ok(0)
    }
}
