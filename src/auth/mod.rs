//! Credential store and provider authentication
//!
//! - DrChrono exchanges a client id/secret for a bearer token at its OAuth2
//!   token endpoint (client-credentials grant) and can refresh it.
//! - Epic's FHIR sandbox uses Basic auth, so its record is synthesized
//!   locally from the username and password with a fixed 24 hour expiry.

pub mod credentials;
pub mod manager;

pub use credentials::{CredentialRecord, TokenType};
pub use manager::AuthManager;
