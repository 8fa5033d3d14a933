//! CLI command implementations
//!
//! This module contains all CLI command implementations. Commands report
//! their outcome as a process exit code:
//!
//! - `0` success
//! - `1` a provider call failed or a provider is unhealthy
//! - `2` configuration error
//! - `4` no provider could be initialized
//! - `5` fatal error

pub mod appointments;
pub mod health;
pub mod init;
pub mod patients;
pub mod validate;

use crate::config::{load_config, AppConfig};
use crate::core::integration::{InitializationReport, IntegrationManager};
use crate::domain::{ApiResponse, ProviderKind};
use serde::Serialize;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_CONNECTION: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Loaded configuration plus an initialized manager
pub struct Session {
    pub config: AppConfig,
    pub manager: IntegrationManager,
    pub report: InitializationReport,
}

/// Load the configuration (which validates it), then initialize every
/// configured provider
///
/// `provider` overrides the configured active provider. On failure the
/// problem has already been printed and the exit code is returned.
pub async fn open_session(
    config_path: &str,
    provider: Option<ProviderKind>,
) -> Result<Session, i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load configuration file");
            eprintln!("   Error: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    let mut manager = match IntegrationManager::with_http_config(config.http.clone()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("❌ Failed to create HTTP client");
            eprintln!("   Error: {e}");
            return Err(EXIT_FATAL);
        }
    };

    let report = manager.initialize(config.provider_configs()).await;
    for (failed, reason) in report.failures() {
        eprintln!("⚠️  {} unavailable: {reason}", failed.display_name());
    }
    if report.configured_count() == 0 {
        eprintln!("❌ No EHR provider could be initialized");
        return Err(EXIT_CONNECTION);
    }

    manager.set_active_provider(provider.unwrap_or(config.application.active_provider));

    Ok(Session {
        config,
        manager,
        report,
    })
}

/// Print a provider result as pretty JSON and map it to an exit code
pub fn print_response<T: Serialize>(
    result: crate::domain::Result<ApiResponse<T>>,
) -> anyhow::Result<i32> {
    match result {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(if response.is_success() {
                EXIT_OK
            } else {
                EXIT_FAILED
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Provider call failed");
            eprintln!("❌ {e}");
            Ok(EXIT_FAILED)
        }
    }
}
