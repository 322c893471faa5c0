//! Check command implementation
//!
//! Validates a prescription request file offline. No configuration or
//! network access is needed.

use crate::core::validation::validate_request;
use crate::domain::PrescriptionRequest;
use anyhow::Context;
use clap::Args;
use std::path::Path;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Prescription request JSON file
    pub file: String,

    /// Print the validation result as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file, "Checking prescription request");

        let request = match read_request(&self.file) {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Could not read prescription request: {}", self.file);
                println!("   Error: {e:#}");
                return Ok(1);
            }
        };

        let result = validate_request(&request);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if result.valid {
            println!("✅ {} is a valid prescription request", self.file);
        } else {
            println!(
                "❌ {} has {} validation error(s):",
                self.file,
                result.errors.len()
            );
            for error in &result.errors {
                println!("   - {error}");
            }
        }

        Ok(if result.valid { 0 } else { 1 })
    }
}

/// Reads and parses a prescription request JSON file
pub(crate) fn read_request(path: impl AsRef<Path>) -> anyhow::Result<PrescriptionRequest> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    PrescriptionRequest::from_json(&contents)
        .with_context(|| format!("{} is not a prescription request", path.display()))
}
