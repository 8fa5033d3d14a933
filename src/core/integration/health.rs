//! Provider liveness probe

use crate::adapters::ehr::EhrClient;
use crate::domain::{Pagination, ProviderKind};
use serde::Serialize;

/// Health of each provider
///
/// A provider without a constructed client is reported unhealthy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub drchrono: bool,
    pub epic: bool,
}

impl HealthReport {
    pub fn get(&self, provider: ProviderKind) -> bool {
        match provider {
            ProviderKind::DrChrono => self.drchrono,
            ProviderKind::Epic => self.epic,
        }
    }

    pub fn set(&mut self, provider: ProviderKind, healthy: bool) {
        match provider {
            ProviderKind::DrChrono => self.drchrono = healthy,
            ProviderKind::Epic => self.epic = healthy,
        }
    }
}

/// Probe a client with a one-record patient listing
///
/// Healthy iff the call returns a successful response. Errors never
/// propagate.
pub async fn probe(client: &dyn EhrClient) -> bool {
    let provider = client.provider();
    match client.list_patients(Pagination::new(1, 1)).await {
        Ok(response) if response.is_success() => {
            tracing::debug!(provider = %provider, "Health check passed");
            true
        }
        Ok(response) => {
            tracing::warn!(
                provider = %provider,
                status = ?response.status,
                error = response.error.as_deref().unwrap_or_default(),
                "Health check failed"
            );
            false
        }
        Err(e) => {
            tracing::warn!(provider = %provider, error = %e, "Health check failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut report = HealthReport::default();
        assert!(!report.get(ProviderKind::Epic));
        report.set(ProviderKind::Epic, true);
        assert!(report.get(ProviderKind::Epic));
        assert!(!report.get(ProviderKind::DrChrono));
    }
}
