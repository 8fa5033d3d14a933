//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Pretty or JSON-formatted console logs
//! - Configurable log levels (overridable with `RUST_LOG`)
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ehrlink::logging::init_logging;
//! use ehrlink::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an outbound provider request
///
/// # Example
///
/// ```no_run
/// use ehrlink::log_api_request;
/// use ehrlink::domain::ProviderKind;
///
/// log_api_request!(ProviderKind::Epic, "GET", "https://fhir.epic.com/Patient");
/// ```
#[macro_export]
macro_rules! log_api_request {
    ($provider:expr, $method:expr, $url:expr) => {
        tracing::debug!(
            provider = %$provider,
            method = %$method,
            url = %$url,
            "API Request: {} {}",
            $method,
            $url
        );
    };
}

/// Log a provider response status
///
/// # Example
///
/// ```no_run
/// use ehrlink::log_api_response;
/// use ehrlink::domain::ProviderKind;
///
/// log_api_response!(ProviderKind::DrChrono, 200u16, "https://drchrono.com/api/patients");
/// ```
#[macro_export]
macro_rules! log_api_response {
    ($provider:expr, $status:expr, $url:expr) => {
        tracing::debug!(
            provider = %$provider,
            status = $status,
            url = %$url,
            "API Response: {} {}",
            $status,
            $url
        );
    };
}

/// Log a failed provider call
///
/// # Example
///
/// ```no_run
/// use ehrlink::log_api_error;
/// use ehrlink::domain::ProviderKind;
///
/// log_api_error!(ProviderKind::Epic, Some(500u16), "https://fhir.epic.com/Patient", "Internal error");
/// ```
#[macro_export]
macro_rules! log_api_error {
    ($provider:expr, $status:expr, $url:expr, $error:expr) => {
        tracing::error!(
            provider = %$provider,
            status = ?$status,
            url = %$url,
            error = %$error,
            "API Response Error"
        );
    };
}
