//! Provider identifier
//!
//! Identifies the external EHR systems ehrlink can target.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External EHR system selector
///
/// # Examples
///
/// ```
/// use ehrlink::domain::ids::ProviderKind;
/// use std::str::FromStr;
///
/// let provider = ProviderKind::from_str("epic").unwrap();
/// assert_eq!(provider, ProviderKind::Epic);
/// assert_eq!(provider.to_string(), "epic");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// DrChrono REST API (OAuth2 client credentials)
    #[default]
    DrChrono,
    /// Epic FHIR R4 API (Basic auth in sandbox)
    Epic,
}

impl ProviderKind {
    /// All known providers, in health-report order
    pub const ALL: [ProviderKind; 2] = [ProviderKind::DrChrono, ProviderKind::Epic];

    /// Wire identifier of the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::DrChrono => "drchrono",
            ProviderKind::Epic => "epic",
        }
    }

    /// Human readable name used in messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::DrChrono => "DrChrono",
            ProviderKind::Epic => "Epic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drchrono" => Ok(ProviderKind::DrChrono),
            "epic" => Ok(ProviderKind::Epic),
            other => Err(format!(
                "Unknown EHR provider '{other}'. Supported providers: drchrono, epic"
            )),
        }
    }
}
