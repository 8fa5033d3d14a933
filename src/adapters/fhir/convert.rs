//! Conversion between domain objects and FHIR resources
//!
//! Writes go domain → FHIR and reads come back FHIR → domain, so the Epic
//! client hands out the same shapes as the DrChrono client. A conversion
//! fails with [`EhrError::Conversion`] when a field FHIR requires is missing
//! or malformed.

use super::models::{
    AppointmentParticipant, Bundle, CodeableConcept, ContactPoint, FhirAddress, FhirAppointment,
    FhirPatient, FhirResource, HumanName, PatientContact, Reference, APPOINTMENT, PATIENT,
};
use crate::domain::{
    Address, Appointment, AppointmentStatus, AppointmentUpdate, EhrError, EmergencyContact,
    Gender, Page, Pagination, Patient, PatientUpdate, Result,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const PRACTITIONER: &str = "Practitioner";
const PARTICIPANT_ACCEPTED: &str = "accepted";

/// FHIR appointment status for a domain status
pub fn status_to_fhir(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "pending",
        AppointmentStatus::Confirmed => "booked",
        AppointmentStatus::Completed => "fulfilled",
        AppointmentStatus::Cancelled => "cancelled",
        AppointmentStatus::NoShow => "noshow",
    }
}

/// Domain status for a FHIR appointment status
///
/// FHIR states without a domain counterpart fold onto the nearest one.
pub fn status_from_fhir(status: &str) -> Result<AppointmentStatus> {
    match status {
        "proposed" | "pending" | "waitlist" => Ok(AppointmentStatus::Scheduled),
        "booked" | "arrived" | "checked-in" => Ok(AppointmentStatus::Confirmed),
        "fulfilled" => Ok(AppointmentStatus::Completed),
        "cancelled" | "entered-in-error" => Ok(AppointmentStatus::Cancelled),
        "noshow" => Ok(AppointmentStatus::NoShow),
        other => Err(EhrError::Conversion(format!(
            "Unknown FHIR appointment status '{other}'"
        ))),
    }
}

/// Build a FHIR Patient for creation
///
/// # Errors
///
/// Fails if the last name is empty or the date of birth is not `YYYY-MM-DD`.
pub fn patient_to_fhir(patient: &Patient) -> Result<FhirPatient> {
    if patient.last_name.trim().is_empty() {
        return Err(EhrError::Conversion(
            "Patient last name is required for FHIR Patient.name.family".to_string(),
        ));
    }
    let birth_date = parse_date(&patient.date_of_birth, "Patient date of birth")?;

    Ok(FhirPatient {
        resource_type: PATIENT.to_string(),
        id: non_empty(&patient.id),
        name: vec![human_name(Some(&patient.first_name), Some(&patient.last_name))],
        gender: Some(patient.gender.as_str().to_string()),
        birth_date: Some(birth_date.format(DATE_FORMAT).to_string()),
        telecom: telecom(patient.phone.as_deref(), patient.email.as_deref()),
        address: patient.address.iter().map(address_to_fhir).collect(),
        contact: patient
            .emergency_contact
            .iter()
            .map(emergency_contact_to_fhir)
            .collect(),
    })
}

/// Build the FHIR Patient sent by a `PUT /Patient/{id}` for a partial update
///
/// Only fields present in the update are emitted.
pub fn patient_update_to_fhir(id: &str, update: &PatientUpdate) -> Result<FhirPatient> {
    let birth_date = update
        .date_of_birth
        .as_deref()
        .map(|d| parse_date(d, "Patient date of birth"))
        .transpose()?;

    let name = if update.first_name.is_some() || update.last_name.is_some() {
        vec![human_name(
            update.first_name.as_deref(),
            update.last_name.as_deref(),
        )]
    } else {
        Vec::new()
    };

    Ok(FhirPatient {
        resource_type: PATIENT.to_string(),
        id: Some(id.to_string()),
        name,
        gender: update.gender.map(|g| g.as_str().to_string()),
        birth_date: birth_date.map(|d| d.format(DATE_FORMAT).to_string()),
        telecom: telecom(update.phone.as_deref(), update.email.as_deref()),
        address: update.address.iter().map(address_to_fhir).collect(),
        contact: update
            .emergency_contact
            .iter()
            .map(emergency_contact_to_fhir)
            .collect(),
    })
}

/// Map a FHIR Patient back into the domain
///
/// The `official` name is preferred, otherwise the first one. FHIR gender
/// `unknown` (or none) becomes [`Gender::Other`].
pub fn fhir_to_patient(resource: FhirPatient) -> Result<Patient> {
    expect_resource_type(&resource.resource_type, PATIENT)?;
    let id = required_id(resource.id, PATIENT)?;

    let name = resource
        .name
        .iter()
        .find(|n| n.use_.as_deref() == Some("official"))
        .or_else(|| resource.name.first());
    let (first_name, last_name) = match name {
        Some(n) => (n.given.join(" "), n.family.clone().unwrap_or_default()),
        None => (String::new(), String::new()),
    };

    let gender = resource
        .gender
        .as_deref()
        .and_then(|g| Gender::from_str(g).ok())
        .unwrap_or(Gender::Other);

    Ok(Patient {
        id,
        first_name,
        last_name,
        date_of_birth: resource.birth_date.unwrap_or_default(),
        gender,
        phone: contact_value(&resource.telecom, "phone"),
        email: contact_value(&resource.telecom, "email"),
        address: resource.address.first().map(address_from_fhir),
        emergency_contact: resource.contact.first().map(emergency_contact_from_fhir),
        insurance_info: None,
        insurance: None,
        allergies: Vec::new(),
        medications: Vec::new(),
        medical_history: Vec::new(),
    })
}

/// Build a FHIR Appointment for creation
///
/// `start` is `<date>T<time>:00` and `end` is `start + duration` minutes.
///
/// # Errors
///
/// Fails if the patient id, provider id, date or time is missing, or the
/// date/time cannot be parsed.
pub fn appointment_to_fhir(appointment: &Appointment) -> Result<FhirAppointment> {
    for (value, field) in [
        (&appointment.patient_id, "patient id"),
        (&appointment.provider_id, "provider id"),
        (&appointment.date, "date"),
        (&appointment.time, "time"),
    ] {
        if value.trim().is_empty() {
            return Err(EhrError::Conversion(format!(
                "Appointment {field} is required for FHIR conversion"
            )));
        }
    }

    let start = parse_start(&appointment.date, &appointment.time)?;
    let end = start + Duration::minutes(i64::from(appointment.duration));

    Ok(FhirAppointment {
        resource_type: APPOINTMENT.to_string(),
        id: non_empty(&appointment.id),
        status: Some(status_to_fhir(appointment.status).to_string()),
        service_type: concept(&appointment.appointment_type),
        reason_code: appointment
            .reason
            .iter()
            .map(|r| CodeableConcept::text(r.as_str()))
            .collect(),
        start: Some(start.format(DATE_TIME_FORMAT).to_string()),
        end: Some(end.format(DATE_TIME_FORMAT).to_string()),
        minutes_duration: Some(appointment.duration),
        comment: appointment.notes.clone(),
        participant: vec![
            participant(PATIENT, &appointment.patient_id, &appointment.patient_name),
            participant(
                PRACTITIONER,
                &appointment.provider_id,
                &appointment.provider_name,
            ),
        ],
    })
}

/// Build the FHIR Appointment sent by a `PUT /Appointment/{id}` for a
/// partial update
///
/// # Errors
///
/// `date` and `time` must be given together; `end` cannot be derived from
/// only one of them.
pub fn appointment_update_to_fhir(id: &str, update: &AppointmentUpdate) -> Result<FhirAppointment> {
    let (start, end) = match (update.date.as_deref(), update.time.as_deref()) {
        (Some(date), Some(time)) => {
            let start = parse_start(date, time)?;
            let end = update
                .duration
                .map(|minutes| start + Duration::minutes(i64::from(minutes)));
            (
                Some(start.format(DATE_TIME_FORMAT).to_string()),
                end.map(|e| e.format(DATE_TIME_FORMAT).to_string()),
            )
        }
        (None, None) => (None, None),
        _ => {
            return Err(EhrError::Conversion(
                "Appointment date and time must be updated together".to_string(),
            ))
        }
    };

    let mut participant = Vec::new();
    if let Some(ref patient_id) = update.patient_id {
        participant.push(participant_from_update(
            PATIENT,
            patient_id,
            update.patient_name.as_deref(),
        ));
    }
    if let Some(ref provider_id) = update.provider_id {
        participant.push(participant_from_update(
            PRACTITIONER,
            provider_id,
            update.provider_name.as_deref(),
        ));
    }

    Ok(FhirAppointment {
        resource_type: APPOINTMENT.to_string(),
        id: Some(id.to_string()),
        status: update.status.map(|s| status_to_fhir(s).to_string()),
        service_type: update
            .appointment_type
            .as_deref()
            .map(concept)
            .unwrap_or_default(),
        reason_code: update
            .reason
            .iter()
            .map(|r| CodeableConcept::text(r.as_str()))
            .collect(),
        start,
        end,
        minutes_duration: update.duration,
        comment: update.notes.clone(),
        participant,
    })
}

/// Map a FHIR Appointment back into the domain
///
/// The duration comes from `minutesDuration`, else from `end - start`.
pub fn fhir_to_appointment(resource: FhirAppointment) -> Result<Appointment> {
    expect_resource_type(&resource.resource_type, APPOINTMENT)?;
    let id = required_id(resource.id, APPOINTMENT)?;
    let status = resource
        .status
        .as_deref()
        .ok_or_else(|| {
            EhrError::Conversion(format!("FHIR Appointment {id} has no status"))
        })
        .and_then(status_from_fhir)?;

    let start = resource.start.as_deref().map(parse_instant).transpose()?;
    let end = resource.end.as_deref().map(parse_instant).transpose()?;
    let duration = match (resource.minutes_duration, start, end) {
        (Some(minutes), _, _) => minutes,
        (None, Some(start), Some(end)) => {
            u32::try_from((end - start).num_minutes()).unwrap_or_default()
        }
        _ => 0,
    };

    let mut appointment = Appointment {
        id,
        patient_id: String::new(),
        patient_name: String::new(),
        provider_id: String::new(),
        provider_name: String::new(),
        appointment_type: resource
            .service_type
            .first()
            .and_then(|c| c.text.clone())
            .unwrap_or_default(),
        date: start
            .map(|s| s.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        time: start.map(|s| s.format("%H:%M").to_string()).unwrap_or_default(),
        scheduled_date_time: resource.start,
        duration,
        status,
        reason: resource.reason_code.first().and_then(|c| c.text.clone()),
        notes: resource.comment,
        location: None,
    };

    for actor in resource.participant.into_iter().filter_map(|p| p.actor) {
        if let Some(patient_id) = actor.id_for(PATIENT) {
            appointment.patient_id = patient_id.to_string();
            appointment.patient_name = actor.display.clone().unwrap_or_default();
        } else if let Some(provider_id) = actor.id_for(PRACTITIONER) {
            appointment.provider_id = provider_id.to_string();
            appointment.provider_name = actor.display.clone().unwrap_or_default();
        }
    }

    Ok(appointment)
}

/// Convert a search bundle into a domain page
///
/// Entries of other resource types (such as search `OperationOutcome`s) are
/// skipped. `total` falls back to the number of matching entries when the
/// server omits it.
pub fn bundle_to_page<R: FhirResource, T>(
    bundle: Bundle<R>,
    pagination: Pagination,
    convert: impl Fn(R) -> Result<T>,
) -> Result<Page<T>> {
    let declared_total = bundle.total;
    let data = bundle
        .entry
        .into_iter()
        .filter_map(|entry| entry.resource)
        .filter(|resource| resource.resource_type() == R::RESOURCE_TYPE)
        .map(convert)
        .collect::<Result<Vec<T>>>()?;

    let total = declared_total.unwrap_or(data.len() as u64);
    Ok(Page::new(data, total, pagination))
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn human_name(first_name: Option<&str>, last_name: Option<&str>) -> HumanName {
    HumanName {
        use_: None,
        text: None,
        given: first_name
            .filter(|n| !n.trim().is_empty())
            .map(|n| vec![n.to_string()])
            .unwrap_or_default(),
        family: last_name.map(str::to_string),
    }
}

fn telecom(phone: Option<&str>, email: Option<&str>) -> Vec<ContactPoint> {
    let mut points = Vec::new();
    if let Some(phone) = phone.filter(|p| !p.trim().is_empty()) {
        points.push(ContactPoint::new("phone", phone));
    }
    if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
        points.push(ContactPoint::new("email", email));
    }
    points
}

fn contact_value(points: &[ContactPoint], system: &str) -> Option<String> {
    points
        .iter()
        .find(|p| p.system.as_deref() == Some(system))
        .and_then(|p| p.value.clone())
}

fn address_to_fhir(address: &Address) -> FhirAddress {
    FhirAddress {
        line: vec![address.street.clone()],
        city: Some(address.city.clone()),
        state: Some(address.state.clone()),
        postal_code: Some(address.zip_code.clone()),
        country: address.country.clone(),
    }
}

fn address_from_fhir(address: &FhirAddress) -> Address {
    Address {
        street: address.line.join(", "),
        city: address.city.clone().unwrap_or_default(),
        state: address.state.clone().unwrap_or_default(),
        zip_code: address.postal_code.clone().unwrap_or_default(),
        country: address.country.clone(),
    }
}

fn emergency_contact_to_fhir(contact: &EmergencyContact) -> PatientContact {
    PatientContact {
        relationship: vec![CodeableConcept::text(contact.relationship.clone())],
        name: Some(HumanName {
            text: Some(contact.name.clone()),
            ..Default::default()
        }),
        telecom: vec![ContactPoint::new("phone", contact.phone.clone())],
    }
}

fn emergency_contact_from_fhir(contact: &PatientContact) -> EmergencyContact {
    let name = contact
        .name
        .as_ref()
        .map(|n| {
            n.text.clone().unwrap_or_else(|| {
                let mut parts = n.given.clone();
                parts.extend(n.family.clone());
                parts.join(" ")
            })
        })
        .unwrap_or_default();

    EmergencyContact {
        name,
        relationship: contact
            .relationship
            .first()
            .and_then(|r| r.text.clone())
            .unwrap_or_default(),
        phone: contact_value(&contact.telecom, "phone").unwrap_or_default(),
    }
}

fn concept(text: &str) -> Vec<CodeableConcept> {
    if text.trim().is_empty() {
        Vec::new()
    } else {
        vec![CodeableConcept::text(text)]
    }
}

fn participant(resource_type: &str, id: &str, display: &str) -> AppointmentParticipant {
    participant_from_update(resource_type, id, Some(display))
}

fn participant_from_update(
    resource_type: &str,
    id: &str,
    display: Option<&str>,
) -> AppointmentParticipant {
    AppointmentParticipant {
        actor: Some(Reference {
            reference: Some(format!("{resource_type}/{id}")),
            display: display.filter(|d| !d.trim().is_empty()).map(str::to_string),
        }),
        status: Some(PARTICIPANT_ACCEPTED.to_string()),
    }
}

fn expect_resource_type(actual: &str, expected: &str) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(EhrError::Conversion(format!(
            "Expected FHIR resource type '{expected}', got '{actual}'"
        )))
    }
}

fn required_id(id: Option<String>, resource_type: &str) -> Result<String> {
    id.filter(|id| !id.trim().is_empty()).ok_or_else(|| {
        EhrError::Conversion(format!("FHIR {resource_type} resource has no id"))
    })
}

fn parse_date(value: &str, what: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        EhrError::Conversion(format!("{what} '{value}' is not a YYYY-MM-DD date: {e}"))
    })
}

fn parse_start(date: &str, time: &str) -> Result<NaiveDateTime> {
    let date = parse_date(date, "Appointment date")?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .map_err(|e| {
            EhrError::Conversion(format!("Appointment time '{time}' is not HH:MM: {e}"))
        })?;
    Ok(date.and_time(time))
}

/// FHIR instants carry an offset; local wall-clock time is kept
fn parse_instant(value: &str) -> Result<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT))
        .map_err(|e| EhrError::Conversion(format!("Invalid FHIR dateTime '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn jane_doe() -> Patient {
        Patient::builder()
            .first_name("Jane")
            .last_name("Doe")
            .gender(Gender::Female)
            .date_of_birth("1990-01-01")
            .build()
            .unwrap()
    }

    fn appointment() -> Appointment {
        Appointment {
            id: String::new(),
            patient_id: "p1".to_string(),
            patient_name: "Jane Doe".to_string(),
            provider_id: "d7".to_string(),
            provider_name: "Dr. Smith".to_string(),
            appointment_type: "Follow-up".to_string(),
            date: "2024-05-01".to_string(),
            time: "09:30".to_string(),
            scheduled_date_time: None,
            duration: 45,
            status: AppointmentStatus::Confirmed,
            reason: Some("Blood pressure check".to_string()),
            notes: Some("Bring readings".to_string()),
            location: Some("Room 4".to_string()),
        }
    }

    #[test]
    fn test_patient_to_fhir_minimal() {
        let fhir = patient_to_fhir(&jane_doe()).unwrap();
        assert_eq!(
            serde_json::to_value(&fhir).unwrap(),
            json!({
                "resourceType": "Patient",
                "name": [{ "given": ["Jane"], "family": "Doe" }],
                "gender": "female",
                "birthDate": "1990-01-01"
            })
        );
    }

    #[test]
    fn test_patient_to_fhir_with_contact_details() {
        let mut patient = jane_doe();
        patient.phone = Some("555-0100".to_string());
        patient.address = Some(Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: None,
        });

        let value = serde_json::to_value(patient_to_fhir(&patient).unwrap()).unwrap();
        assert_eq!(value["telecom"], json!([{ "system": "phone", "value": "555-0100" }]));
        assert_eq!(
            value["address"],
            json!([{ "line": ["1 Main St"], "city": "Springfield", "state": "IL", "postalCode": "62701" }])
        );
    }

    #[test]
    fn test_patient_to_fhir_requires_last_name_and_birth_date() {
        let mut patient = jane_doe();
        patient.last_name = String::new();
        assert!(matches!(patient_to_fhir(&patient), Err(EhrError::Conversion(_))));

        let mut patient = jane_doe();
        patient.date_of_birth = "01/01/1990".to_string();
        assert!(matches!(patient_to_fhir(&patient), Err(EhrError::Conversion(_))));
    }

    #[test]
    fn test_patient_update_only_emits_present_fields() {
        let update = PatientUpdate {
            email: Some("jane@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(patient_update_to_fhir("p1", &update).unwrap()).unwrap(),
            json!({
                "resourceType": "Patient",
                "id": "p1",
                "telecom": [{ "system": "email", "value": "jane@example.com" }]
            })
        );
    }

    #[test]
    fn test_fhir_to_patient() {
        let resource: FhirPatient = serde_json::from_value(json!({
            "resourceType": "Patient",
            "id": "eXYZ",
            "name": [
                { "use": "usual", "given": ["Janie"], "family": "Doe" },
                { "use": "official", "given": ["Jane", "Q"], "family": "Doe" }
            ],
            "gender": "female",
            "birthDate": "1990-01-01",
            "telecom": [
                { "system": "phone", "value": "555-0100" },
                { "system": "email", "value": "jane@example.com" }
            ],
            "address": [{ "line": ["1 Main St", "Apt 2"], "city": "Springfield",
                          "state": "IL", "postalCode": "62701" }],
            "contact": [{ "relationship": [{ "text": "Spouse" }],
                          "name": { "text": "John Doe" },
                          "telecom": [{ "system": "phone", "value": "555-0101" }] }]
        }))
        .unwrap();

        let patient = fhir_to_patient(resource).unwrap();
        assert_eq!(patient.id, "eXYZ");
        assert_eq!(patient.first_name, "Jane Q");
        assert_eq!(patient.last_name, "Doe");
        assert_eq!(patient.gender, Gender::Female);
        assert_eq!(patient.phone.as_deref(), Some("555-0100"));
        assert_eq!(patient.email.as_deref(), Some("jane@example.com"));
        assert_eq!(patient.address.unwrap().street, "1 Main St, Apt 2");
        let contact = patient.emergency_contact.unwrap();
        assert_eq!(contact.name, "John Doe");
        assert_eq!(contact.relationship, "Spouse");
        assert_eq!(contact.phone, "555-0101");
    }

    #[test]
    fn test_fhir_to_patient_requires_id() {
        let resource = FhirPatient {
            resource_type: PATIENT.to_string(),
            ..Default::default()
        };
        assert!(matches!(fhir_to_patient(resource), Err(EhrError::Conversion(_))));
    }

    #[test]
    fn test_appointment_to_fhir() {
        let value = serde_json::to_value(appointment_to_fhir(&appointment()).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "resourceType": "Appointment",
                "status": "booked",
                "serviceType": [{ "text": "Follow-up" }],
                "reasonCode": [{ "text": "Blood pressure check" }],
                "start": "2024-05-01T09:30:00",
                "end": "2024-05-01T10:15:00",
                "minutesDuration": 45,
                "comment": "Bring readings",
                "participant": [
                    { "actor": { "reference": "Patient/p1", "display": "Jane Doe" }, "status": "accepted" },
                    { "actor": { "reference": "Practitioner/d7", "display": "Dr. Smith" }, "status": "accepted" }
                ]
            })
        );
    }

    #[test]
    fn test_appointment_to_fhir_requires_fields() {
        let mut missing_provider = appointment();
        missing_provider.provider_id = String::new();
        assert!(matches!(
            appointment_to_fhir(&missing_provider),
            Err(EhrError::Conversion(_))
        ));

        let mut bad_time = appointment();
        bad_time.time = "half past nine".to_string();
        assert!(matches!(appointment_to_fhir(&bad_time), Err(EhrError::Conversion(_))));
    }

    #[test]
    fn test_cancel_update_body() {
        let fhir = appointment_update_to_fhir("a1", &AppointmentUpdate::cancelled()).unwrap();
        assert_eq!(
            serde_json::to_value(fhir).unwrap(),
            json!({ "resourceType": "Appointment", "id": "a1", "status": "cancelled" })
        );
    }

    #[test]
    fn test_update_requires_date_and_time_together() {
        let update = AppointmentUpdate {
            date: Some("2024-05-02".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            appointment_update_to_fhir("a1", &update),
            Err(EhrError::Conversion(_))
        ));
    }

    #[test]
    fn test_fhir_to_appointment() {
        let resource: FhirAppointment = serde_json::from_value(json!({
            "resourceType": "Appointment",
            "id": "a1",
            "status": "booked",
            "serviceType": [{ "text": "Follow-up" }],
            "start": "2024-05-01T09:30:00Z",
            "end": "2024-05-01T10:00:00Z",
            "participant": [
                { "actor": { "reference": "Practitioner/d7", "display": "Dr. Smith" } },
                { "actor": { "reference": "Patient/p1", "display": "Jane Doe" } },
                { "actor": { "reference": "Location/l1" } }
            ]
        }))
        .unwrap();

        let appt = fhir_to_appointment(resource).unwrap();
        assert_eq!(appt.id, "a1");
        assert_eq!(appt.status, AppointmentStatus::Confirmed);
        assert_eq!(appt.date, "2024-05-01");
        assert_eq!(appt.time, "09:30");
        assert_eq!(appt.duration, 30);
        assert_eq!(appt.patient_id, "p1");
        assert_eq!(appt.patient_name, "Jane Doe");
        assert_eq!(appt.provider_id, "d7");
        assert_eq!(appt.appointment_type, "Follow-up");
        assert_eq!(appt.scheduled_date_time.as_deref(), Some("2024-05-01T09:30:00Z"));
    }

    #[test]
    fn test_fhir_to_appointment_requires_status() {
        let resource = FhirAppointment {
            resource_type: APPOINTMENT.to_string(),
            id: Some("a1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            fhir_to_appointment(resource),
            Err(EhrError::Conversion(_))
        ));
    }

    #[test_case(AppointmentStatus::Scheduled, "pending")]
    #[test_case(AppointmentStatus::Confirmed, "booked")]
    #[test_case(AppointmentStatus::Completed, "fulfilled")]
    #[test_case(AppointmentStatus::Cancelled, "cancelled")]
    #[test_case(AppointmentStatus::NoShow, "noshow")]
    fn test_status_mapping(status: AppointmentStatus, fhir: &str) {
        assert_eq!(status_to_fhir(status), fhir);
        assert_eq!(status_from_fhir(fhir).unwrap(), status);
    }

    #[test_case("proposed", AppointmentStatus::Scheduled)]
    #[test_case("arrived", AppointmentStatus::Confirmed)]
    #[test_case("checked-in", AppointmentStatus::Confirmed)]
    #[test_case("entered-in-error", AppointmentStatus::Cancelled)]
    fn test_status_folding(fhir: &str, status: AppointmentStatus) {
        assert_eq!(status_from_fhir(fhir).unwrap(), status);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(status_from_fhir("rescheduled").is_err());
    }

    #[test]
    fn test_bundle_to_page() {
        let bundle: Bundle<FhirPatient> = serde_json::from_value(json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": 41,
            "entry": [
                { "resource": { "resourceType": "Patient", "id": "p1",
                                "name": [{ "family": "Doe", "given": ["Jane"] }] } },
                { "resource": { "resourceType": "OperationOutcome" } }
            ]
        }))
        .unwrap();

        let page = bundle_to_page(bundle, Pagination::new(3, 20), fhir_to_patient).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total, 41);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.has_next, Some(false));
        assert_eq!(page.data[0].last_name, "Doe");
    }
}
