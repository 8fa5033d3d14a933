//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ehrlink using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ehrlink - Multi-provider EHR integration
#[derive(Parser, Debug)]
#[command(name = "ehrlink")]
#[command(version, about, long_about = None)]
#[command(author = "Ehrlink Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ehrlink.toml", env = "EHRLINK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "EHRLINK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Check that every configured provider responds
    Health(commands::health::HealthArgs),

    /// List or fetch patients from the active provider
    Patients(commands::patients::PatientsArgs),

    /// List, fetch or cancel appointments on the active provider
    Appointments(commands::appointments::AppointmentsArgs),
}

impl Cli {
    /// Run the selected command and return the process exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Init(args) => args.execute().await,
            Commands::ValidateConfig(args) => args.execute(&self.config).await,
            Commands::Health(args) => args.execute(&self.config).await,
            Commands::Patients(args) => args.execute(&self.config).await,
            Commands::Appointments(args) => args.execute(&self.config).await,
        }
    }
}
