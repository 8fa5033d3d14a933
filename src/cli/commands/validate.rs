//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the ehrlink configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config, AppConfig};
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

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                print_summary(&config);
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}

/// Secrets are never printed; only whether they are set
fn print_summary(config: &AppConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!(
        "  Active Provider: {}",
        config.application.active_provider.display_name()
    );
    println!("  HTTP Timeout: {}s", config.http.timeout_seconds);

    if let Some(ref drchrono) = config.drchrono {
        println!("  DrChrono API: {}", drchrono.base_url);
        println!("  DrChrono Token URL: {}", drchrono.token_url);
        println!("  DrChrono Client ID: {}", drchrono.client_id);
        println!("  DrChrono Client Secret: ***");
    }
    if let Some(ref epic) = config.epic {
        println!("  Epic FHIR: {}", epic.base_url);
        println!("  Epic Username: {}", epic.username);
        println!("  Epic Password: ***");
    }

    println!("  Log Format: {}", config.logging.format);
    println!();
}
