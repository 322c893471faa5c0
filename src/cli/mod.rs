//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Receta using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Receta - Electronic prescription submission client
#[derive(Parser, Debug)]
#[command(name = "receta")]
#[command(version, about, long_about = None)]
#[command(author = "Receta Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "receta.toml", env = "RECETA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RECETA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a prescription request file without submitting it
    Check(commands::check::CheckArgs),

    /// Submit a prescription from a file or a built-in template
    Submit(commands::submit::SubmitArgs),

    /// List built-in prescription templates
    Templates(commands::templates::TemplatesArgs),

    /// Run the CORS forwarder
    Proxy(commands::proxy::ProxyArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["receta", "check", "request.json"]);
        assert_eq!(cli.config, "receta.toml");
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.file, "request.json");
                assert!(!args.json);
            }
            other => panic!("Expected check, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["receta", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["receta", "--log-level", "debug", "templates"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_submit_template() {
        let cli = Cli::parse_from(["receta", "submit", "--template", "osde"]);
        match cli.command {
            Commands::Submit(args) => {
                assert_eq!(args.template.as_deref(), Some("osde"));
                assert!(args.file.is_none());
            }
            other => panic!("Expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_submit_requires_a_source() {
        assert!(Cli::try_parse_from(["receta", "submit"]).is_err());
    }

    #[test]
    fn test_cli_submit_file_and_template_conflict() {
        let result =
            Cli::try_parse_from(["receta", "submit", "--file", "a.json", "--template", "osde"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_templates_show() {
        let cli = Cli::parse_from(["receta", "templates", "--show", "private"]);
        match cli.command {
            Commands::Templates(args) => assert_eq!(args.show.as_deref(), Some("private")),
            other => panic!("Expected templates, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_proxy_overrides() {
        let cli = Cli::parse_from([
            "receta",
            "proxy",
            "--listen",
            "0.0.0.0:8080",
            "--upstream",
            "https://apirecipe.qbitos.com/apirecipe/Receta",
        ]);
        match cli.command {
            Commands::Proxy(args) => {
                assert_eq!(args.listen.as_deref(), Some("0.0.0.0:8080"));
                assert!(args.upstream.is_some());
            }
            other => panic!("Expected proxy, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["receta", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.force);
                assert_eq!(args.output, "receta.toml");
            }
            other => panic!("Expected init, got {other:?}"),
        }
    }
}
