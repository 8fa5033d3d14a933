//! Core orchestration for ehrlink.
//!
//! # Modules
//!
//! - [`integration`] - the integration manager, its initialization report
//!   and health checks
//!
//! # Workflow
//!
//! 1. **Load configuration**: build the list of provider configurations
//! 2. **Initialize**: authenticate each provider and construct its client;
//!    failures are recorded, not fatal
//! 3. **Select**: choose the active provider
//! 4. **Operate**: issue unified patient/appointment calls, which the
//!    manager forwards to the active client
//!
//! # Example
//!
//! ```rust,no_run
//! use ehrlink::config::load_config;
//! use ehrlink::core::integration::IntegrationManager;
//! use ehrlink::domain::Pagination;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ehrlink.toml")?;
//!
//! let mut manager = IntegrationManager::with_http_config(config.http.clone())?;
//! let report = manager.initialize(config.provider_configs()).await;
//! for (provider, reason) in report.failures() {
//!     eprintln!("{provider}: {reason}");
//! }
//!
//! manager.set_active_provider(config.application.active_provider);
//! let response = manager.get_patients(Pagination::default()).await?;
//! println!("success: {}", response.is_success());
//! # Ok(())
//! # }
//! ```

pub mod integration;
