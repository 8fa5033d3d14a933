//! Multi-provider EHR integration
//!
//! - [`IntegrationManager`] - owns provider clients and routes unified calls
//! - [`InitializationReport`] - per-provider outcome of `initialize`
//! - [`HealthReport`] - per-provider liveness

pub mod health;
pub mod manager;
pub mod report;

pub use health::HealthReport;
pub use manager::IntegrationManager;
pub use report::{InitializationReport, ProviderOutcome, ProviderStatus};
