//! Credential store
//!
//! Obtains per-provider credentials and caches them with their expiry. At
//! most one record is kept per provider; every successful authentication
//! or refresh overwrites it.

use super::credentials::{CredentialRecord, TokenType};
use crate::config::{secret_string, DrChronoConfig, EpicConfig, ProviderConfig, SecretString};
use crate::domain::{EhrError, ProviderKind, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::collections::HashMap;

/// Lifetime of synthesized Basic credentials
const BASIC_CREDENTIAL_LIFETIME_HOURS: i64 = 24;
const FAILURE_AUTHENTICATE: &str = "DrChrono authentication failed";
const FAILURE_REFRESH: &str = "Token refresh failed";

/// OAuth2 token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
    #[serde(default)]
    token_type: Option<String>,
}

/// Per-provider credential cache
///
/// Owned by the integration manager (or any other host); there is no global
/// instance.
///
/// # Example
///
/// ```no_run
/// use ehrlink::auth::AuthManager;
/// use ehrlink::config::{secret_string, DrChronoConfig};
/// use ehrlink::domain::ProviderKind;
///
/// # async fn example() -> ehrlink::domain::Result<()> {
/// let mut auth = AuthManager::new();
/// let config = DrChronoConfig::new("client-id", secret_string("client-secret"));
/// auth.authenticate_drchrono(&config).await?;
/// assert!(auth.is_valid(ProviderKind::DrChrono));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AuthManager {
    http: Client,
    credentials: HashMap<ProviderKind, CredentialRecord>,
}

impl AuthManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given HTTP client for token endpoint calls
    pub fn with_client(http: Client) -> Self {
        Self {
            http,
            credentials: HashMap::new(),
        }
    }

    /// Authenticates against whichever provider the configuration names
    ///
    /// # Errors
    ///
    /// See [`authenticate_drchrono`](Self::authenticate_drchrono); Epic
    /// authentication never fails.
    pub async fn authenticate(&mut self, config: &ProviderConfig) -> Result<CredentialRecord> {
        match config {
            ProviderConfig::DrChrono(drchrono) => self.authenticate_drchrono(drchrono).await,
            ProviderConfig::Epic(epic) => Ok(self.authenticate_epic(epic)),
        }
    }

    /// Exchanges the DrChrono client id/secret for a bearer token
    /// (client-credentials grant)
    ///
    /// # Errors
    ///
    /// - [`EhrError::Authentication`] carrying the status text when the token
    ///   endpoint answers with a non-success status, or when its body is not
    ///   a token response
    /// - [`EhrError::Transport`] when the endpoint cannot be reached
    pub async fn authenticate_drchrono(
        &mut self,
        config: &DrChronoConfig,
    ) -> Result<CredentialRecord> {
        tracing::info!(token_url = %config.token_url, "Authenticating with DrChrono");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.expose_secret().as_str()),
        ];
        let token = self
            .request_token(&config.token_url, &form, FAILURE_AUTHENTICATE)
            .await?;

        let record = Self::bearer_record(token, None, Utc::now(), FAILURE_AUTHENTICATE)?;
        self.store(record.clone());

        tracing::info!(
            expires_at = %record.expires_at,
            token_type = %record.token_type,
            "DrChrono authentication succeeded"
        );
        Ok(record)
    }

    /// Synthesizes Basic credentials for the Epic sandbox
    ///
    /// No server round-trip happens; the record is valid for 24 hours.
    pub fn authenticate_epic(&mut self, config: &EpicConfig) -> CredentialRecord {
        let raw = format!(
            "{}:{}",
            config.username,
            config.password.expose_secret().as_str()
        );
        let encoded = general_purpose::STANDARD.encode(raw.as_bytes());

        let record = CredentialRecord {
            provider: ProviderKind::Epic,
            access_token: secret_string(encoded),
            refresh_token: None,
            expires_at: Utc::now() + Duration::hours(BASIC_CREDENTIAL_LIFETIME_HOURS),
            token_type: TokenType::Basic,
        };
        self.store(record.clone());

        tracing::info!("Using Basic Authentication for Epic FHIR");
        record
    }

    /// Exchanges a DrChrono refresh token for a new access token
    ///
    /// If the server omits a refresh token in its response, the one passed
    /// in is kept.
    ///
    /// # Errors
    ///
    /// Same as [`authenticate_drchrono`](Self::authenticate_drchrono).
    pub async fn refresh_drchrono(
        &mut self,
        config: &DrChronoConfig,
        refresh_token: &SecretString,
    ) -> Result<CredentialRecord> {
        tracing::info!(token_url = %config.token_url, "Refreshing DrChrono access token");

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.expose_secret().as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.expose_secret().as_str()),
        ];
        let token = self
            .request_token(&config.token_url, &form, FAILURE_REFRESH)
            .await?;

        let record = Self::bearer_record(
            token,
            Some(refresh_token.clone()),
            Utc::now(),
            FAILURE_REFRESH,
        )?;
        self.store(record.clone());
        Ok(record)
    }

    /// Stored record for a provider, if any
    pub fn credentials(&self, provider: ProviderKind) -> Option<&CredentialRecord> {
        self.credentials.get(&provider)
    }

    /// True iff a record exists for the provider and has not expired
    pub fn is_valid(&self, provider: ProviderKind) -> bool {
        self.is_valid_at(provider, Utc::now())
    }

    /// Validity check against an explicit clock reading
    pub fn is_valid_at(&self, provider: ProviderKind, now: DateTime<Utc>) -> bool {
        self.credentials
            .get(&provider)
            .map(|record| record.is_valid_at(now))
            .unwrap_or(false)
    }

    fn store(&mut self, record: CredentialRecord) {
        self.credentials.insert(record.provider, record);
    }

    async fn request_token(
        &self,
        token_url: &str,
        form: &[(&str, &str)],
        failure_prefix: &str,
    ) -> Result<TokenResponse> {
        let response = self
            .http
            .post(token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                EhrError::transport(format!("Failed to reach DrChrono token endpoint: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "DrChrono token endpoint rejected request");
            return Err(EhrError::authentication(
                ProviderKind::DrChrono,
                format!("{failure_prefix}: {}", status_text(status)),
            ));
        }

        response.json::<TokenResponse>().await.map_err(|e| {
            EhrError::authentication(
                ProviderKind::DrChrono,
                format!("{failure_prefix}: invalid token response: {e}"),
            )
        })
    }

    /// Builds the DrChrono record from a token response
    ///
    /// `expires_in` must be a non-negative lifetime that fits the calendar.
    fn bearer_record(
        token: TokenResponse,
        previous_refresh: Option<SecretString>,
        now: DateTime<Utc>,
        failure_prefix: &str,
    ) -> Result<CredentialRecord> {
        let expires_at = Some(token.expires_in)
            .filter(|secs| *secs >= 0)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                tracing::error!(
                    expires_in = token.expires_in,
                    "DrChrono token has an unusable lifetime"
                );
                EhrError::authentication(
                    ProviderKind::DrChrono,
                    format!("{failure_prefix}: invalid expires_in {}", token.expires_in),
                )
            })?;

        Ok(CredentialRecord {
            provider: ProviderKind::DrChrono,
            access_token: secret_string(token.access_token),
            refresh_token: token.refresh_token.map(secret_string).or(previous_refresh),
            expires_at,
            token_type: TokenType::from_oauth(token.token_type.as_deref()),
        })
    }
}

/// Reason phrase for a status, e.g. "Unauthorized"
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
