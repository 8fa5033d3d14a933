//! Domain error types
//!
//! This module defines the error hierarchy for ehrlink. All errors are
//! domain-specific and don't expose third-party HTTP client types.

use super::ids::ProviderKind;
use thiserror::Error;

/// Main ehrlink error type
///
/// Resource-level HTTP failures are normally reported through
/// [`ApiResponse`](super::ApiResponse) rather than this type; `Transport` is
/// produced when a caller converts a failed response with
/// [`ApiResponse::into_result`](super::ApiResponse::into_result) or when the
/// token endpoint is unreachable.
#[derive(Debug, Error)]
pub enum EhrError {
    /// Credential exchange with a provider failed
    #[error("Authentication error ({provider}): {message}")]
    Authentication {
        provider: ProviderKind,
        message: String,
    },

    /// Underlying HTTP call failed (network or non-2xx)
    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// A unified operation was invoked while the active provider has no client
    #[error("No active EHR client for provider '{0}'")]
    NoActiveClient(ProviderKind),

    /// Domain object could not be mapped to or from a FHIR resource
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// The provider does not implement the requested operation
    #[error("Operation '{operation}' is not supported by provider '{provider}'")]
    UnsupportedOperation {
        provider: ProviderKind,
        operation: &'static str,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl EhrError {
    /// Builds an authentication error for a provider
    pub fn authentication(provider: ProviderKind, message: impl Into<String>) -> Self {
        EhrError::Authentication {
            provider,
            message: message.into(),
        }
    }

    /// Builds a transport error without an HTTP status (network failure)
    pub fn transport(message: impl Into<String>) -> Self {
        EhrError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status associated with the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            EhrError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<std::io::Error> for EhrError {
    fn from(err: std::io::Error) -> Self {
        EhrError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EhrError {
    fn from(err: serde_json::Error) -> Self {
        EhrError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EhrError {
    fn from(err: toml::de::Error) -> Self {
        EhrError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_error_display() {
        let err = EhrError::authentication(
            ProviderKind::DrChrono,
            "DrChrono authentication failed: Unauthorized",
        );
        assert_eq!(
            err.to_string(),
            "Authentication error (drchrono): DrChrono authentication failed: Unauthorized"
        );
    }

    #[test]
    fn test_no_active_client_display() {
        let err = EhrError::NoActiveClient(ProviderKind::Epic);
        assert_eq!(err.to_string(), "No active EHR client for provider 'epic'");
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = EhrError::UnsupportedOperation {
            provider: ProviderKind::Epic,
            operation: "delete_patient",
        };
        assert!(err.to_string().contains("delete_patient"));
        assert!(err.to_string().contains("epic"));
    }

    #[test]
    fn test_transport_status() {
        let err = EhrError::Transport {
            status: Some(503),
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(EhrError::transport("connection refused").status(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: EhrError = io_err.into();
        assert!(matches!(err, EhrError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: EhrError = json_err.into();
        assert!(matches!(err, EhrError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: EhrError = toml_err.into();
        assert!(matches!(err, EhrError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
