//! Submit command implementation
//!
//! Sends a prescription request, read from a file or built from a
//! template, to the configured prescription API.

use super::check::read_request;
use crate::config::load_config;
use crate::core::submission::PrescriptionService;
use crate::core::templates::{find_template, prescription_templates};
use crate::domain::{PrescriptionError, PrescriptionRequest};
use clap::Args;

/// Arguments for the submit command
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Prescription request JSON file
    #[arg(short, long, conflicts_with = "template", required_unless_present = "template")]
    pub file: Option<String>,

    /// Built-in template id (see `receta templates`)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Print the receipt or error as JSON
    #[arg(long)]
    pub json: bool,
}

impl SubmitArgs {
    /// Execute the submit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let request = match self.load_request() {
            Ok(r) => r,
            Err(code) => return Ok(code),
        };

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let service = match PrescriptionService::from_config(&config.api) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        println!("📤 Submitting prescription to {}", config.api.endpoint_url);

        match service.generate_prescription(&request).await {
            Ok(receipt) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&receipt)?);
                } else if receipt.has_upstream_id() {
                    println!("✅ Prescription generated: {}", receipt.prescription_id);
                } else {
                    println!("⚠️  Prescription accepted, but the API returned no prescription id");
                }
                if let Some(message) = receipt.message.as_deref().filter(|_| !self.json) {
                    println!("   {message}");
                }
                Ok(0)
            }
            Err(e) => {
                if self.json {
                    let report = serde_json::json!({
                        "success": false,
                        "statusCode": e.status_code(),
                        "message": e.to_string(),
                        "details": e.details(),
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_error(&e);
                }
                Ok(exit_code(&e))
            }
        }
    }

    fn load_request(&self) -> Result<PrescriptionRequest, i32> {
        if let Some(id) = &self.template {
            return match find_template(id) {
                Some(template) => {
                    println!("📋 Using template: {} ({})", template.name, template.id);
                    Ok((template.create)())
                }
                None => {
                    let known: Vec<_> = prescription_templates().iter().map(|t| t.id).collect();
                    eprintln!("❌ Unknown template '{id}'. Available: {}", known.join(", "));
                    Err(2)
                }
            };
        }

        let Some(path) = &self.file else {
            eprintln!("❌ Either --file or --template is required");
            return Err(2);
        };

        read_request(path).map_err(|e| {
            eprintln!("❌ Could not read prescription request: {e:#}");
            1
        })
    }
}

/// Exit code for a failed submission
fn exit_code(err: &PrescriptionError) -> i32 {
    match err {
        PrescriptionError::Validation { .. } => 1,
        PrescriptionError::Api { .. } => 3,
        PrescriptionError::Connection { .. } => 4,
        PrescriptionError::Unknown { .. } => 5,
    }
}

fn print_error(err: &PrescriptionError) {
    match err {
        PrescriptionError::Validation { errors } => {
            eprintln!("❌ Prescription request is invalid:");
            for error in errors {
                eprintln!("   - {error}");
            }
        }
        PrescriptionError::Api {
            status, message, ..
        } => {
            eprintln!("❌ Prescription API rejected the request ({status}): {message}");
        }
        PrescriptionError::Connection { message } => {
            eprintln!("❌ Could not reach the prescription API: {message}");
        }
        PrescriptionError::Unknown { message } => {
            eprintln!("❌ Unexpected error: {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code(&PrescriptionError::Validation { errors: vec![] }),
            1
        );
        assert_eq!(
            exit_code(&PrescriptionError::from_upstream(422, serde_json::json!({}))),
            3
        );
        assert_eq!(
            exit_code(&PrescriptionError::Connection {
                message: String::new()
            }),
            4
        );
        assert_eq!(
            exit_code(&PrescriptionError::Unknown {
                message: String::new()
            }),
            5
        );
    }

    #[test]
    fn test_load_request_from_template() {
        let args = SubmitArgs {
            file: None,
            template: Some("luis-pasteur".to_string()),
            json: false,
        };

        let request = args.load_request().unwrap();
        let coverage = request.patient.coverage.unwrap();
        assert_eq!(coverage.policy_number.as_deref(), Some("42731800060"));
    }

    #[test]
    fn test_unknown_template_is_usage_error() {
        let args = SubmitArgs {
            file: None,
            template: Some("ioma".to_string()),
            json: false,
        };

        assert_eq!(args.load_request().unwrap_err(), 2);
    }

    #[tokio::test]
    async fn test_missing_config_is_config_error() {
        let args = SubmitArgs {
            file: None,
            template: Some("osde".to_string()),
            json: false,
        };

        assert_eq!(args.execute("missing-receta.toml").await.unwrap(), 2);
    }
}
