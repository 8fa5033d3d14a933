//! FHIR R4 support for the Epic client
//!
//! - [`models`] - wire types for the Patient, Appointment and Bundle resources
//! - [`convert`] - mapping between those resources and the domain model

pub mod convert;
pub mod models;

pub use convert::{
    appointment_to_fhir, appointment_update_to_fhir, bundle_to_page, fhir_to_appointment,
    fhir_to_patient, patient_to_fhir, patient_update_to_fhir, status_from_fhir, status_to_fhir,
};
pub use models::{Bundle, FhirAppointment, FhirPatient, FhirResource};
