//! Domain models and types for ehrlink.
//!
//! This module contains the provider-neutral domain model that both EHR
//! integrations are normalized into.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Provider selection** ([`ProviderKind`])
//! - **Domain models** ([`Patient`], [`Appointment`], [`Practitioner`])
//! - **Partial updates** ([`PatientUpdate`], [`AppointmentUpdate`])
//! - **Response envelopes** ([`ApiResponse`], [`Page`], [`Pagination`])
//! - **Error types** ([`EhrError`]) and the [`Result`] alias
//!
//! # Builder Pattern
//!
//! ```rust
//! use ehrlink::domain::{Gender, Patient};
//!
//! # fn example() -> Result<(), String> {
//! let patient = Patient::builder()
//!     .first_name("Jane")
//!     .last_name("Doe")
//!     .gender(Gender::Female)
//!     .date_of_birth("1990-01-01")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod appointment;
pub mod errors;
pub mod ids;
pub mod patient;
pub mod practitioner;
pub mod response;
pub mod result;

pub use appointment::{Appointment, AppointmentQuery, AppointmentStatus, AppointmentUpdate};
pub use errors::EhrError;
pub use ids::ProviderKind;
pub use patient::{Address, EmergencyContact, Gender, Patient, PatientBuilder, PatientUpdate};
pub use practitioner::Practitioner;
pub use response::{ApiResponse, Page, Pagination};
pub use result::Result;
