//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "receta.toml")]
    pub output: String,

    /// Include every optional setting with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Receta configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set api.client_app_id to the id assigned by Innovamed");
                println!("  2. Point api.endpoint_url at production once homologation passes");
                println!("  3. Validate configuration: receta validate-config");
                println!("  4. Try a submission: receta submit --template osde");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Receta Configuration File

[application]
log_level = "info"

[api]
endpoint_url = "https://apirecipe.hml.qbitos.com/apirecipe/Receta"
client_app_id = 0
"#
        .to_string()
    }

    /// Generate configuration with every setting documented
    fn generate_config_with_examples() -> String {
        r#"# Receta Configuration File
#
# Values may reference environment variables with ${VAR_NAME}. Any key can
# also be overridden with RECETA_<SECTION>_<KEY>, e.g. RECETA_API_CLIENT_APP_ID.

[application]
# trace, debug, info, warn, error (RUST_LOG takes precedence)
log_level = "info"

[api]
# Where prescriptions are POSTed. Use the local forwarder address when
# submitting from a browser, e.g. "http://127.0.0.1:3001/api/prescription".
# Homologation: https://apirecipe.hml.qbitos.com/apirecipe/Receta
# Production:   https://apirecipe.qbitos.com/apirecipe/Receta
endpoint_url = "https://apirecipe.hml.qbitos.com/apirecipe/Receta"

# Client application id assigned by Innovamed; stamped on every request
client_app_id = 0

# Request timeout in seconds; no timeout when omitted
# timeout_seconds = 30

[proxy]
# Address the CORS forwarder listens on
listen_addr = "127.0.0.1:3001"

# Where the forwarder relays POSTs to
upstream_url = "https://apirecipe.hml.qbitos.com/apirecipe/Receta"

[logging]
# Write JSON logs to rolling files in addition to the console
local_enabled = false
local_path = "./logs"

# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecetaConfig;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "receta.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "receta.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let content = InitArgs::generate_minimal_config();
        let config: RecetaConfig = toml::from_str(&content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.api.client_app_id, 0);
    }

    #[test]
    fn test_generate_config_with_examples() {
        let content = InitArgs::generate_config_with_examples();
        assert!(content.contains("# Receta Configuration File"));
        assert!(content.contains("[proxy]"));

        let config: RecetaConfig = toml::from_str(&content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.proxy.listen_addr, "127.0.0.1:3001");
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite_without_force() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("receta.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");
    }

    #[tokio::test]
    async fn test_force_overwrites() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("receta.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: true,
            force: true,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[logging]"));
    }
}
