//! Templates command implementation

use crate::core::templates::{find_template, prescription_templates, NO_AFFILIATE};
use clap::Args;
use serde_json::json;

/// Arguments for the templates command
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Print the request built by this template instead of the list
    #[arg(long, value_name = "ID")]
    pub show: Option<String>,

    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}

impl TemplatesArgs {
    /// Execute the templates command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        if let Some(id) = &self.show {
            let Some(template) = find_template(id) else {
                eprintln!("❌ Unknown template '{id}'");
                return Ok(2);
            };
            println!("{}", serde_json::to_string_pretty(&(template.create)())?);
            return Ok(0);
        }

        let templates = prescription_templates();

        if self.json {
            let list: Vec<_> = templates
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "name": t.name,
                        "affiliateNumber": t.affiliate_number,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
            return Ok(0);
        }

        println!("📋 Prescription templates:");
        for t in &templates {
            if t.affiliate_number == NO_AFFILIATE {
                println!("  {:<14} {}", t.id, t.name);
            } else {
                println!("  {:<14} {} (affiliate {})", t.id, t.name, t.affiliate_number);
            }
        }

        Ok(0)
    }
}
