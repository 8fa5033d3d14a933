//! Appointments command implementation

use super::{open_session, print_response};
use crate::domain::{AppointmentQuery, ProviderKind};
use clap::{Args, Subcommand};

/// Arguments for the appointments command
#[derive(Args, Debug)]
pub struct AppointmentsArgs {
    /// Provider to query instead of the configured active provider
    #[arg(short, long, global = true)]
    pub provider: Option<ProviderKind>,

    #[command(subcommand)]
    pub command: AppointmentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum AppointmentsCommand {
    /// List appointments
    List {
        /// Only appointments on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Only appointments for this patient id
        #[arg(long)]
        patient: Option<String>,
    },

    /// Show a single appointment
    Get {
        /// Appointment id
        id: String,
    },

    /// Cancel an appointment
    Cancel {
        /// Appointment id
        id: String,
    },
}

impl AppointmentsArgs {
    /// Execute the appointments command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = match open_session(config_path, self.provider).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };
        let manager = &session.manager;
        let provider = manager.active_provider();

        match self.command {
            AppointmentsCommand::List {
                ref date,
                ref patient,
            } => {
                let query = AppointmentQuery {
                    date: date.clone(),
                    patient_id: patient.clone(),
                };
                tracing::info!(provider = %provider, ?query, "Listing appointments");
                print_response(manager.get_appointments(&query).await)
            }
            AppointmentsCommand::Get { ref id } => {
                tracing::info!(provider = %provider, appointment_id = %id, "Fetching appointment");
                print_response(manager.get_appointment(id).await)
            }
            AppointmentsCommand::Cancel { ref id } => {
                tracing::info!(provider = %provider, appointment_id = %id, "Cancelling appointment");
                print_response(manager.cancel_appointment(id).await)
            }
        }
    }
}
