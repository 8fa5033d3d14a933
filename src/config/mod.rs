//! Configuration management for ehrlink.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! ehrlink uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `EHRLINK_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and initially active provider
//! - [`HttpConfig`] - Request and connect timeouts
//! - [`DrChronoConfig`] - DrChrono API and OAuth2 credentials
//! - [`EpicConfig`] - Epic FHIR endpoint and Basic auth credentials
//! - [`LoggingConfig`] - Console format and file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! active_provider = "drchrono"
//!
//! [drchrono]
//! base_url = "https://drchrono.com/api/"
//! client_id = "my-client-id"
//! client_secret = "${EHRLINK_DRCHRONO_SECRET}"
//!
//! [epic]
//! base_url = "https://fhir.epic.com/interconnect-fhir-oauth/api/FHIR/R4/"
//! username = "sandbox-user"
//! password = "${EHRLINK_EPIC_PASSWORD}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    AppConfig, ApplicationConfig, DrChronoConfig, EpicConfig, HttpConfig, LoggingConfig,
    ProviderConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
