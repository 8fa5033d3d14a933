//! Integration manager - routes unified operations to the active provider
//!
//! The manager owns the credential store and one optional client per
//! provider. It is a plain value owned by the host application; there is no
//! global instance. Mutating operations (`initialize`, `set_active_provider`,
//! `refresh_drchrono`) take `&mut self`, so a provider switch can never
//! interleave with a unified call that borrows the manager.

use super::health::{probe, HealthReport};
use super::report::InitializationReport;
use crate::adapters::ehr::{DrChronoClient, EhrClient, EpicClient};
use crate::auth::{AuthManager, CredentialRecord};
use crate::config::{DrChronoConfig, HttpConfig, ProviderConfig};
use crate::domain::{
    ApiResponse, Appointment, AppointmentQuery, AppointmentUpdate, EhrError, Page, Pagination,
    Patient, PatientUpdate, ProviderKind, Result,
};
use reqwest::ClientBuilder;
use std::time::Duration;

/// Multi-provider EHR facade
///
/// # Example
///
/// ```no_run
/// use ehrlink::config::{secret_string, EpicConfig, ProviderConfig};
/// use ehrlink::core::integration::IntegrationManager;
/// use ehrlink::domain::{Pagination, ProviderKind};
///
/// # async fn example() -> ehrlink::domain::Result<()> {
/// let mut manager = IntegrationManager::new();
/// let report = manager
///     .initialize(vec![ProviderConfig::Epic(EpicConfig::new(
///         "user",
///         secret_string("pass"),
///     ))])
///     .await;
/// assert!(report.is_complete());
///
/// manager.set_active_provider(ProviderKind::Epic);
/// let patients = manager.get_patients(Pagination::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IntegrationManager {
    auth: AuthManager,
    http: HttpConfig,
    drchrono: Option<DrChronoClient>,
    epic: Option<EpicClient>,
    active: ProviderKind,
}

impl Default for IntegrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrationManager {
    /// Unconfigured manager with default HTTP settings; DrChrono is active
    pub fn new() -> Self {
        Self {
            auth: AuthManager::new(),
            http: HttpConfig::default(),
            drchrono: None,
            epic: None,
            active: ProviderKind::default(),
        }
    }

    /// Unconfigured manager whose clients (and token requests) use the given
    /// timeouts
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn with_http_config(http: HttpConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(http.timeout_seconds))
            .connect_timeout(Duration::from_secs(http.connect_timeout_seconds))
            .build()
            .map_err(|e| EhrError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            auth: AuthManager::with_client(client),
            http,
            ..Self::new()
        })
    }

    /// Authenticate each provider and construct its client
    ///
    /// A provider that fails is logged and recorded in the report; the
    /// remaining providers are still configured. Never fails as a whole.
    pub async fn initialize(
        &mut self,
        configs: impl IntoIterator<Item = ProviderConfig>,
    ) -> InitializationReport {
        let mut report = InitializationReport::new();

        for config in configs {
            let provider = config.provider();
            tracing::info!(provider = %provider, base_url = %config.base_url(), "Configuring EHR provider");

            match self.configure(&config).await {
                Ok(()) => {
                    tracing::info!(provider = %provider, "EHR provider configured");
                    report.record_success(provider);
                }
                Err(e) => {
                    tracing::error!(provider = %provider, error = %e, "Failed to configure EHR provider");
                    report.record_failure(provider, e.to_string());
                }
            }
        }

        report.log_summary();
        report
    }

    /// Builds the provider's client, then authenticates it
    ///
    /// A client that cannot be built never reaches the credential store.
    async fn configure(&mut self, config: &ProviderConfig) -> Result<()> {
        match config {
            ProviderConfig::DrChrono(drchrono) => {
                let mut client = DrChronoClient::from_config(drchrono, &self.http)?;
                let credentials = self.auth.authenticate(config).await?;
                client.authorize(&credentials);
                self.drchrono = Some(client);
            }
            ProviderConfig::Epic(epic) => {
                let mut client = EpicClient::from_config(epic, &self.http)?;
                let credentials = self.auth.authenticate(config).await?;
                client.authorize(&credentials);
                self.epic = Some(client);
            }
        }
        Ok(())
    }

    /// Select the provider that receives unified calls
    ///
    /// The target does not need a client yet; unified calls fail with
    /// [`EhrError::NoActiveClient`] until it has one.
    pub fn set_active_provider(&mut self, provider: ProviderKind) {
        tracing::info!(provider = %provider, "Switching active EHR provider");
        self.active = provider;
    }

    pub fn active_provider(&self) -> ProviderKind {
        self.active
    }

    /// Client for the active provider
    ///
    /// # Errors
    ///
    /// [`EhrError::NoActiveClient`] when the active provider is not configured.
    pub fn active_client(&self) -> Result<&dyn EhrClient> {
        self.client(self.active)
            .ok_or(EhrError::NoActiveClient(self.active))
    }

    pub fn client(&self, provider: ProviderKind) -> Option<&dyn EhrClient> {
        match provider {
            ProviderKind::DrChrono => self.drchrono.as_ref().map(|c| c as &dyn EhrClient),
            ProviderKind::Epic => self.epic.as_ref().map(|c| c as &dyn EhrClient),
        }
    }

    /// DrChrono client, for provider-specific calls such as practitioners
    pub fn drchrono(&self) -> Option<&DrChronoClient> {
        self.drchrono.as_ref()
    }

    /// Epic client, for provider-specific calls such as name search
    pub fn epic(&self) -> Option<&EpicClient> {
        self.epic.as_ref()
    }

    /// Providers with a constructed client
    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|p| self.client(*p).is_some())
            .collect()
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    /// Exchange the stored DrChrono refresh token and install the new
    /// access token in the DrChrono client
    ///
    /// # Errors
    ///
    /// - [`EhrError::Authentication`] if no refresh token is stored or the
    ///   token endpoint rejects it
    /// - [`EhrError::Transport`] if the token endpoint cannot be reached
    pub async fn refresh_drchrono(&mut self, config: &DrChronoConfig) -> Result<CredentialRecord> {
        let refresh_token = self
            .auth
            .credentials(ProviderKind::DrChrono)
            .and_then(|record| record.refresh_token.clone())
            .ok_or_else(|| {
                EhrError::authentication(
                    ProviderKind::DrChrono,
                    "No refresh token stored for DrChrono",
                )
            })?;

        let record = self.auth.refresh_drchrono(config, &refresh_token).await?;
        if let Some(client) = self.drchrono.as_mut() {
            client.authorize(&record);
        }
        Ok(record)
    }

    pub async fn get_patients(&self, pagination: Pagination) -> Result<ApiResponse<Page<Patient>>> {
        self.active_client()?.list_patients(pagination).await
    }

    pub async fn get_patient(&self, id: &str) -> Result<ApiResponse<Patient>> {
        self.active_client()?.get_patient(id).await
    }

    pub async fn create_patient(&self, patient: &Patient) -> Result<ApiResponse<Patient>> {
        self.active_client()?.create_patient(patient).await
    }

    pub async fn update_patient(
        &self,
        id: &str,
        update: &PatientUpdate,
    ) -> Result<ApiResponse<Patient>> {
        self.active_client()?.update_patient(id, update).await
    }

    pub async fn delete_patient(&self, id: &str) -> Result<ApiResponse<()>> {
        self.active_client()?.delete_patient(id).await
    }

    pub async fn get_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<ApiResponse<Page<Appointment>>> {
        self.active_client()?.list_appointments(query).await
    }

    pub async fn get_appointment(&self, id: &str) -> Result<ApiResponse<Appointment>> {
        self.active_client()?.get_appointment(id).await
    }

    pub async fn create_appointment(
        &self,
        appointment: &Appointment,
    ) -> Result<ApiResponse<Appointment>> {
        self.active_client()?.create_appointment(appointment).await
    }

    pub async fn update_appointment(
        &self,
        id: &str,
        update: &AppointmentUpdate,
    ) -> Result<ApiResponse<Appointment>> {
        self.active_client()?.update_appointment(id, update).await
    }

    pub async fn cancel_appointment(&self, id: &str) -> Result<ApiResponse<()>> {
        self.active_client()?.cancel_appointment(id).await
    }

    /// Probe every configured provider concurrently
    pub async fn health_check(&self) -> HealthReport {
        let drchrono = async {
            match self.drchrono {
                Some(ref client) => probe(client).await,
                None => false,
            }
        };
        let epic = async {
            match self.epic {
                Some(ref client) => probe(client).await,
                None => false,
            }
        };
        let (drchrono, epic) = tokio::join!(drchrono, epic);

        HealthReport { drchrono, epic }
    }
}
