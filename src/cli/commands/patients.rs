//! Patients command implementation

use super::{open_session, print_response};
use crate::domain::{Pagination, ProviderKind};
use clap::{Args, Subcommand};

/// Arguments for the patients command
#[derive(Args, Debug)]
pub struct PatientsArgs {
    /// Provider to query instead of the configured active provider
    #[arg(short, long, global = true)]
    pub provider: Option<ProviderKind>,

    #[command(subcommand)]
    pub command: PatientsCommand,
}

#[derive(Subcommand, Debug)]
pub enum PatientsCommand {
    /// List patients
    List {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    /// Show a single patient
    Get {
        /// Patient id
        id: String,
    },
}

impl PatientsArgs {
    /// Execute the patients command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = match open_session(config_path, self.provider).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };
        let manager = &session.manager;

        match self.command {
            PatientsCommand::List { page, limit } => {
                tracing::info!(provider = %manager.active_provider(), page, limit, "Listing patients");
                print_response(manager.get_patients(Pagination::new(page, limit)).await)
            }
            PatientsCommand::Get { ref id } => {
                tracing::info!(provider = %manager.active_provider(), patient_id = %id, "Fetching patient");
                print_response(manager.get_patient(id).await)
            }
        }
    }
}
