//! External system integrations for ehrlink.
//!
//! - [`ehr`] - provider clients (DrChrono REST, Epic FHIR) behind the
//!   [`EhrClient`](ehr::EhrClient) trait, plus the shared HTTP transport
//! - [`fhir`] - FHIR R4 resource models and domain converters
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate provider-specific
//! transport and wire formats. Everything above this layer works with the
//! domain model only.
//!
//! ```rust,no_run
//! use ehrlink::adapters::ehr::{EhrClient, EpicClient};
//! use ehrlink::config::HttpConfig;
//!
//! # async fn example() -> ehrlink::domain::Result<()> {
//! let client = EpicClient::new("https://fhir.epic.com/", &HttpConfig::default())?;
//! let response = client.get_patient("eXYZ").await?;
//! if let Some(patient) = response.data {
//!     println!("{}", patient.full_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod ehr;
pub mod fhir;
