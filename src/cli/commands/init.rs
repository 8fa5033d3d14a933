//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ehrlink.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ehrlink configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your provider settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - EHRLINK_DRCHRONO_CLIENT_ID and EHRLINK_DRCHRONO_CLIENT_SECRET");
                println!("     - EHRLINK_EPIC_USERNAME and EHRLINK_EPIC_PASSWORD");
                println!("  3. Validate configuration: ehrlink validate-config");
                println!("  4. Check connectivity: ehrlink health");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Sample configuration with both providers enabled
pub fn sample_config() -> &'static str {
    r#"# ehrlink configuration
# Multi-provider EHR integration (DrChrono REST, Epic FHIR R4)

[application]
log_level = "info"
# Provider that receives patient/appointment calls: drchrono | epic
active_provider = "drchrono"

[http]
timeout_seconds = 30
connect_timeout_seconds = 10

[drchrono]
base_url = "https://drchrono.com/api/"
token_url = "https://drchrono.com/o/token/"
client_id = "${EHRLINK_DRCHRONO_CLIENT_ID}"
client_secret = "${EHRLINK_DRCHRONO_CLIENT_SECRET}"

[epic]
base_url = "https://fhir.epic.com/"
username = "${EHRLINK_EPIC_USERNAME}"
password = "${EHRLINK_EPIC_PASSWORD}"

[logging]
format = "pretty"        # pretty | json
local_enabled = false
local_path = "logs"
local_rotation = "daily" # daily | hourly
"#
}
