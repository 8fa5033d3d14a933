//! Initialization report
//!
//! Records which providers came up during `IntegrationManager::initialize`
//! and why the others did not.

use crate::domain::ProviderKind;
use serde::Serialize;

/// Outcome of configuring one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ProviderOutcome {
    Configured,
    Failed { reason: String },
}

/// One line of the initialization report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub provider: ProviderKind,
    #[serde(flatten)]
    pub outcome: ProviderOutcome,
}

/// Result of `initialize`
///
/// Partial configuration is a normal outcome; callers decide whether a
/// failed provider matters to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitializationReport {
    pub providers: Vec<ProviderStatus>,
}

impl InitializationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, provider: ProviderKind) {
        self.providers.push(ProviderStatus {
            provider,
            outcome: ProviderOutcome::Configured,
        });
    }

    pub fn record_failure(&mut self, provider: ProviderKind, reason: impl Into<String>) {
        self.providers.push(ProviderStatus {
            provider,
            outcome: ProviderOutcome::Failed {
                reason: reason.into(),
            },
        });
    }

    /// Providers whose client was constructed
    pub fn configured(&self) -> Vec<ProviderKind> {
        self.providers
            .iter()
            .filter(|s| s.outcome == ProviderOutcome::Configured)
            .map(|s| s.provider)
            .collect()
    }

    /// Providers that failed, with the reason
    pub fn failures(&self) -> Vec<(ProviderKind, &str)> {
        self.providers
            .iter()
            .filter_map(|s| match s.outcome {
                ProviderOutcome::Failed { ref reason } => Some((s.provider, reason.as_str())),
                ProviderOutcome::Configured => None,
            })
            .collect()
    }

    pub fn configured_count(&self) -> usize {
        self.configured().len()
    }

    pub fn failed_count(&self) -> usize {
        self.providers.len() - self.configured_count()
    }

    /// True when every attempted provider was configured
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn log_summary(&self) {
        tracing::info!(
            attempted = self.providers.len(),
            configured = self.configured_count(),
            failed = self.failed_count(),
            "EHR integration initialized"
        );
    }
}
