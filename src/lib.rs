// Ehrlink - Multi-provider EHR Integration
// Copyright (c) 2025 Ehrlink Contributors
// Licensed under the MIT License

//! # ehrlink - Multi-provider EHR Integration
//!
//! ehrlink puts two electronic health record systems with different
//! protocols behind one interface: DrChrono (REST, OAuth2 bearer tokens)
//! and Epic (FHIR R4, Basic auth).
//!
//! ## Overview
//!
//! This library provides:
//! - **Authenticating** each provider and caching credentials with expiry
//! - **Talking** to each provider through a uniform client contract
//! - **Converting** between the domain model and FHIR resources
//! - **Routing** unified patient and appointment calls to the active provider
//!
//! ## Architecture
//!
//! ehrlink follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Integration manager, initialization and health reports
//! - [`adapters`] - Provider clients, HTTP transport, FHIR converters
//! - [`auth`] - Credential store
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ehrlink::config::load_config;
//! use ehrlink::core::integration::IntegrationManager;
//! use ehrlink::domain::{AppointmentQuery, ProviderKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ehrlink.toml")?;
//!
//!     let mut manager = IntegrationManager::with_http_config(config.http.clone())?;
//!     let report = manager.initialize(config.provider_configs()).await;
//!     println!("configured: {:?}", report.configured());
//!
//!     manager.set_active_provider(ProviderKind::Epic);
//!     let today = AppointmentQuery::new().on_date("2025-03-14");
//!     let response = manager.get_appointments(&today).await?;
//!     if let Some(page) = response.data {
//!         println!("{} appointments", page.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! HTTP failures from resource calls come back as a failed
//! [`domain::ApiResponse`]; [`domain::EhrError`] is reserved for failures
//! that prevent a call from being made (no active client, conversion,
//! unsupported operation) and for authentication:
//!
//! ```rust,no_run
//! use ehrlink::domain::{EhrError, ProviderKind};
//! use ehrlink::core::integration::IntegrationManager;
//!
//! # async fn example() {
//! let manager = IntegrationManager::new();
//! match manager.get_patient("p1").await {
//!     Err(EhrError::NoActiveClient(ProviderKind::DrChrono)) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! ehrlink uses structured logging with the `tracing` crate. Every provider
//! request and response is logged with `provider`, `method`, `url` and
//! `status` fields.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
