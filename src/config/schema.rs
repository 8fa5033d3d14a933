//! Configuration schema types
//!
//! This module defines the configuration structure for ehrlink.

use crate::config::SecretString;
use crate::domain::ProviderKind;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Root configuration, mapped from the TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP transport settings shared by all provider clients
    #[serde(default)]
    pub http: HttpConfig,

    /// DrChrono REST API configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drchrono: Option<DrChronoConfig>,

    /// Epic FHIR API configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<EpicConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.http.validate()?;

        if self.drchrono.is_none() && self.epic.is_none() {
            return Err(
                "At least one provider section ([drchrono] or [epic]) must be configured"
                    .to_string(),
            );
        }

        if let Some(ref drchrono) = self.drchrono {
            drchrono.validate()?;
        }
        if let Some(ref epic) = self.epic {
            epic.validate()?;
        }

        let active = self.application.active_provider;
        let active_configured = match active {
            ProviderKind::DrChrono => self.drchrono.is_some(),
            ProviderKind::Epic => self.epic.is_some(),
        };
        if !active_configured {
            return Err(format!(
                "application.active_provider is '{active}' but no [{active}] section is configured"
            ));
        }

        self.logging.validate()?;
        Ok(())
    }

    /// Provider configurations in declaration order (DrChrono, then Epic)
    pub fn provider_configs(&self) -> Vec<ProviderConfig> {
        let mut configs = Vec::new();
        if let Some(ref drchrono) = self.drchrono {
            configs.push(ProviderConfig::DrChrono(drchrono.clone()));
        }
        if let Some(ref epic) = self.epic {
            configs.push(ProviderConfig::Epic(epic.clone()));
        }
        configs
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Provider that receives unified operations after initialization
    #[serde(default)]
    pub active_provider: ProviderKind,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            active_provider: ProviderKind::default(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }
}

impl HttpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("http.timeout_seconds must be > 0".to_string());
        }
        if self.connect_timeout_seconds == 0 {
            return Err("http.connect_timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

/// DrChrono connection settings (OAuth2 client credentials)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrChronoConfig {
    /// Base URL of the DrChrono REST API
    #[serde(default = "default_drchrono_base_url")]
    pub base_url: String,

    /// OAuth2 token endpoint
    #[serde(default = "default_drchrono_token_url")]
    pub token_url: String,

    /// OAuth2 client id
    pub client_id: String,

    /// OAuth2 client secret
    /// Stored securely in memory and automatically zeroized on drop
    pub client_secret: SecretString,
}

impl DrChronoConfig {
    /// Configuration against the public DrChrono endpoints
    pub fn new(client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            base_url: default_drchrono_base_url(),
            token_url: default_drchrono_token_url(),
            client_id: client_id.into(),
            client_secret,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Validates the DrChrono section
    pub fn validate(&self) -> Result<(), String> {
        validate_url("drchrono.base_url", &self.base_url)?;
        validate_url("drchrono.token_url", &self.token_url)?;

        if self.client_id.trim().is_empty() {
            return Err("drchrono.client_id cannot be empty".to_string());
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err("drchrono.client_secret cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Epic FHIR connection settings (Basic auth)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicConfig {
    /// Base URL of the FHIR R4 endpoint
    #[serde(default = "default_epic_base_url")]
    pub base_url: String,

    /// Basic auth username
    pub username: String,

    /// Basic auth password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,
}

impl EpicConfig {
    /// Configuration against the public Epic FHIR endpoint
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            base_url: default_epic_base_url(),
            username: username.into(),
            password,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validates the Epic section
    pub fn validate(&self) -> Result<(), String> {
        validate_url("epic.base_url", &self.base_url)?;

        if self.username.trim().is_empty() {
            return Err("epic.username cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("epic.password cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Per-provider configuration handed to the integration manager
///
/// Each variant carries only the credentials its authentication path
/// needs, so a DrChrono config can never hold a username/password pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderConfig {
    DrChrono(DrChronoConfig),
    Epic(EpicConfig),
}

impl ProviderConfig {
    pub fn provider(&self) -> ProviderKind {
        match self {
            ProviderConfig::DrChrono(_) => ProviderKind::DrChrono,
            ProviderConfig::Epic(_) => ProviderKind::Epic,
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            ProviderConfig::DrChrono(config) => &config.base_url,
            ProviderConfig::Epic(config) => &config.base_url,
        }
    }
}

impl From<DrChronoConfig> for ProviderConfig {
    fn from(config: DrChronoConfig) -> Self {
        ProviderConfig::DrChrono(config)
    }
}

impl From<EpicConfig> for ProviderConfig {
    fn from(config: EpicConfig) -> Self {
        ProviderConfig::Epic(config)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Console format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy ("daily" or "hourly")
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(format!(
                "Invalid logging.format '{}'. Must be one of: {}",
                self.format,
                valid_formats.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    let parsed = url::Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("{field} must start with http:// or https://"));
    }
    Ok(())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_drchrono_base_url() -> String {
    "https://drchrono.com/api/".to_string()
}

fn default_drchrono_token_url() -> String {
    "https://drchrono.com/o/token/".to_string()
}

fn default_epic_base_url() -> String {
    "https://fhir.epic.com/".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
