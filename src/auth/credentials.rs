//! Credential records held by the auth manager

use crate::config::SecretString;
use crate::domain::ProviderKind;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authorization scheme of an access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    Bearer,
    Basic,
}

impl TokenType {
    /// Parses the `token_type` reported by an OAuth2 server
    ///
    /// Unknown or missing values fall back to `Bearer`.
    pub fn from_oauth(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(ref v) if v == "basic" => TokenType::Basic,
            _ => TokenType::Bearer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Bearer => "Bearer",
            TokenType::Basic => "Basic",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached authentication material for one provider
///
/// A record is valid while `expires_at` lies in the future.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub provider: ProviderKind,
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    pub expires_at: DateTime<Utc>,
    pub token_type: TokenType,
}

impl CredentialRecord {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Value for the `Authorization` header, e.g. `Bearer tok1`
    pub fn authorization_header(&self) -> String {
        format!(
            "{} {}",
            self.token_type,
            self.access_token.expose_secret().as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use chrono::Duration;

    fn record(expires_at: DateTime<Utc>) -> CredentialRecord {
        CredentialRecord {
            provider: ProviderKind::DrChrono,
            access_token: secret_string("tok1"),
            refresh_token: None,
            expires_at,
            token_type: TokenType::Bearer,
        }
    }

    #[test]
    fn test_validity_follows_expiry() {
        let now = Utc::now();
        let rec = record(now + Duration::seconds(60));
        assert!(rec.is_valid_at(now));
        assert!(!rec.is_valid_at(now + Duration::seconds(60)));
        assert!(!rec.is_valid_at(now + Duration::seconds(61)));
    }

    #[test]
    fn test_authorization_header() {
        let rec = record(Utc::now());
        assert_eq!(rec.authorization_header(), "Bearer tok1");
    }

    #[test]
    fn test_token_type_from_oauth() {
        assert_eq!(TokenType::from_oauth(None), TokenType::Bearer);
        assert_eq!(TokenType::from_oauth(Some("bearer")), TokenType::Bearer);
        assert_eq!(TokenType::from_oauth(Some("Basic")), TokenType::Basic);
        assert_eq!(TokenType::from_oauth(Some("mac")), TokenType::Bearer);
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let rec = record(Utc::now());
        assert!(!format!("{rec:?}").contains("tok1"));
    }
}
