//! Proxy command implementation
//!
//! Runs the CORS forwarder until a shutdown signal is received.

use crate::adapters::proxy;
use crate::config::{load_config, ProxyConfig};
use clap::Args;
use std::path::Path;
use tokio::sync::watch;

/// Arguments for the proxy command
#[derive(Args, Debug)]
pub struct ProxyArgs {
    /// Override the listen address (e.g. 127.0.0.1:3001)
    #[arg(long)]
    pub listen: Option<String>,

    /// Override the upstream URL
    #[arg(long)]
    pub upstream: Option<String>,
}

impl ProxyArgs {
    /// Execute the proxy command
    ///
    /// The configuration file is optional here: without one the forwarder
    /// runs with its defaults.
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = if Path::new(config_path).exists() {
            match load_config(config_path) {
                Ok(c) => c.proxy,
                Err(e) => {
                    crate::log_error_with_context!(&e, "Failed to load configuration");
                    eprintln!("❌ {e}");
                    return Ok(2);
                }
            }
        } else {
            tracing::info!(config_path = %config_path, "No configuration file, using forwarder defaults");
            ProxyConfig::default()
        };

        self.apply_overrides(&mut config);
        if let Err(e) = config.validate() {
            eprintln!("❌ Invalid forwarder configuration: {e}");
            return Ok(2);
        }

        println!(
            "🔀 Forwarding http://{} -> {}",
            config.listen_addr, config.upstream_url
        );
        println!("   Press Ctrl+C to stop");

        match proxy::serve(&config, shutdown_signal).await {
            Ok(()) => {
                println!("👋 Forwarder stopped");
                Ok(0)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Forwarder failed");
                eprintln!("❌ {e}");
                Ok(4)
            }
        }
    }

    fn apply_overrides(&self, config: &mut ProxyConfig) {
        if let Some(listen) = &self.listen {
            tracing::info!(listen_addr = %listen, "Overriding listen address from CLI");
            config.listen_addr = listen.clone();
        }
        if let Some(upstream) = &self.upstream {
            tracing::info!(upstream_url = %upstream, "Overriding upstream URL from CLI");
            config.upstream_url = upstream.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let args = ProxyArgs {
            listen: Some("0.0.0.0:8080".to_string()),
            upstream: Some("http://localhost:9000/receta".to_string()),
        };
        let mut config = ProxyConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.upstream_url, "http://localhost:9000/receta");
    }

    #[tokio::test]
    async fn test_invalid_listen_address_is_config_error() {
        let args = ProxyArgs {
            listen: Some("not-an-address".to_string()),
            upstream: None,
        };
        let (_tx, rx) = watch::channel(false);

        assert_eq!(args.execute("missing-receta.toml", rx).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_stops_on_shutdown_signal() {
        let args = ProxyArgs {
            listen: Some("127.0.0.1:0".to_string()),
            upstream: None,
        };
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        assert_eq!(args.execute("missing-receta.toml", rx).await.unwrap(), 0);
    }
}
