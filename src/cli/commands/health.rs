//! Health command implementation
//!
//! Initializes every configured provider and probes each one.

use super::{open_session, EXIT_FAILED, EXIT_OK};
use crate::domain::ProviderKind;
use clap::Args;
use serde_json::json;

/// Arguments for the health command
#[derive(Args, Debug)]
pub struct HealthArgs {}

impl HealthArgs {
    /// Execute the health command
    ///
    /// Exits with `1` if any provider that has a configuration section is
    /// unhealthy, including providers that failed to initialize.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking EHR provider health");

        let session = match open_session(config_path, None).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        let health = session.manager.health_check().await;
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "initialization": session.report,
                "health": health,
            }))?
        );

        let expected: Vec<ProviderKind> = session
            .config
            .provider_configs()
            .iter()
            .map(|c| c.provider())
            .collect();
        let unhealthy: Vec<ProviderKind> = expected
            .into_iter()
            .filter(|p| !health.get(*p))
            .collect();

        if unhealthy.is_empty() {
            tracing::info!("All configured providers are healthy");
            Ok(EXIT_OK)
        } else {
            for provider in &unhealthy {
                tracing::warn!(provider = %provider, "Provider is unhealthy");
            }
            Ok(EXIT_FAILED)
        }
    }
}
