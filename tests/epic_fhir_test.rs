//! Epic FHIR client tests against a mock FHIR server

use ehrlink::adapters::ehr::{EhrClient, EpicClient};
use ehrlink::auth::AuthManager;
use ehrlink::config::{secret_string, EpicConfig, HttpConfig};
use ehrlink::domain::{
    AppointmentQuery, AppointmentStatus, AppointmentUpdate, EhrError, Gender, Pagination, Patient,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

const FHIR_JSON: &str = "application/fhir+json";
// base64("user:pass")
const BASIC_AUTH: &str = "Basic dXNlcjpwYXNz";

async fn setup() -> (ServerGuard, EpicClient) {
    let server = Server::new_async().await;
    let config =
        EpicConfig::new("user", secret_string("pass")).with_base_url(server.url());

    let mut auth = AuthManager::new();
    let record = auth.authenticate_epic(&config);

    let mut client = EpicClient::from_config(&config, &HttpConfig::default()).unwrap();
    client.authorize(&record);
    (server, client)
}

fn fhir_patient(id: &str) -> serde_json::Value {
    json!({
        "resourceType": "Patient",
        "id": id,
        "name": [{ "use": "official", "given": ["Jane"], "family": "Doe" }],
        "gender": "female",
        "birthDate": "1990-01-01"
    })
}

fn fhir_appointment(id: &str, status: &str) -> serde_json::Value {
    json!({
        "resourceType": "Appointment",
        "id": id,
        "status": status,
        "start": "2024-05-01T09:30:00",
        "end": "2024-05-01T10:00:00",
        "participant": [
            { "actor": { "reference": "Patient/p1", "display": "Jane Doe" }, "status": "accepted" },
            { "actor": { "reference": "Practitioner/d1", "display": "Dr. House" }, "status": "accepted" }
        ]
    })
}

#[tokio::test]
async fn test_list_patients_translates_pagination() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("GET", "/Patient")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("_count".into(), "20".into()),
            Matcher::UrlEncoded("_offset".into(), "40".into()),
        ]))
        .match_header("accept", FHIR_JSON)
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_header("content-type", FHIR_JSON)
        .with_body(
            json!({
                "resourceType": "Bundle",
                "type": "searchset",
                "total": 45,
                "entry": [
                    { "resource": fhir_patient("p41") },
                    { "resource": { "resourceType": "OperationOutcome" } }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = client.list_patients(Pagination::new(3, 20)).await.unwrap();

    mock.assert_async().await;
    let page = response.data.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.total, 45);
    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.has_next, Some(false));
    assert_eq!(page.has_prev, Some(true));
    assert_eq!(page.data[0].id, "p41");
    assert_eq!(page.data[0].gender, Gender::Female);
}

#[tokio::test]
async fn test_non_bundle_search_response_is_conversion_error() {
    let (mut server, client) = setup().await;
    server
        .mock("GET", "/Patient")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", FHIR_JSON)
        .with_body(fhir_patient("p1").to_string())
        .create_async()
        .await;

    let result = client.list_patients(Pagination::default()).await;
    assert!(matches!(result, Err(EhrError::Conversion(_))));
}

#[tokio::test]
async fn test_create_patient_sends_fhir_resource() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("POST", "/Patient")
        .match_header("content-type", FHIR_JSON)
        .match_body(Matcher::Json(json!({
            "resourceType": "Patient",
            "name": [{ "given": ["Jane"], "family": "Doe" }],
            "gender": "female",
            "birthDate": "1990-01-01"
        })))
        .with_status(201)
        .with_header("content-type", FHIR_JSON)
        .with_body(fhir_patient("eNEW").to_string())
        .create_async()
        .await;

    let patient = Patient::builder()
        .first_name("Jane")
        .last_name("Doe")
        .date_of_birth("1990-01-01")
        .gender(Gender::Female)
        .build()
        .unwrap();
    let response = client.create_patient(&patient).await.unwrap();

    mock.assert_async().await;
    let created = response.data.unwrap();
    assert_eq!(created.id, "eNEW");
    assert_eq!(created.last_name, "Doe");
}

#[tokio::test]
async fn test_search_patients_by_name() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("GET", "/Patient")
        .match_query(Matcher::UrlEncoded("name".into(), "Doe".into()))
        .with_status(200)
        .with_header("content-type", FHIR_JSON)
        .with_body(
            json!({
                "resourceType": "Bundle",
                "total": 1,
                "entry": [{ "resource": fhir_patient("p1") }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = client.search_patients("Doe").await.unwrap().data.unwrap();

    mock.assert_async().await;
    assert_eq!(page.data[0].first_name, "Jane");
}

#[tokio::test]
async fn test_cancel_and_cancelled_update_send_identical_put() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("PUT", "/Appointment/a1")
        .match_body(Matcher::Json(json!({
            "resourceType": "Appointment",
            "id": "a1",
            "status": "cancelled"
        })))
        .with_status(200)
        .with_header("content-type", FHIR_JSON)
        .with_body(fhir_appointment("a1", "cancelled").to_string())
        .expect(2)
        .create_async()
        .await;

    let cancelled = client.cancel_appointment("a1").await.unwrap();
    let updated = client
        .update_appointment("a1", &AppointmentUpdate::cancelled())
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(cancelled.is_success());
    assert_eq!(
        updated.data.unwrap().status,
        AppointmentStatus::Cancelled
    );
}

#[tokio::test]
async fn test_get_appointment_converts_back() {
    let (mut server, client) = setup().await;
    server
        .mock("GET", "/Appointment/a1")
        .with_status(200)
        .with_header("content-type", FHIR_JSON)
        .with_body(fhir_appointment("a1", "booked").to_string())
        .create_async()
        .await;

    let appointment = client.get_appointment("a1").await.unwrap().data.unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    assert_eq!(appointment.patient_id, "p1");
    assert_eq!(appointment.provider_id, "d1");
    assert_eq!(appointment.date, "2024-05-01");
    assert_eq!(appointment.time, "09:30");
    assert_eq!(appointment.duration, 30);
}

#[tokio::test]
async fn test_list_appointments_filters() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("GET", "/Appointment")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("date".into(), "2024-05-01".into()),
            Matcher::UrlEncoded("patient".into(), "p1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", FHIR_JSON)
        .with_body(
            json!({
                "resourceType": "Bundle",
                "total": 1,
                "entry": [{ "resource": fhir_appointment("a1", "fulfilled") }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let query = AppointmentQuery::new()
        .on_date("2024-05-01")
        .for_patient("p1");
    let page = client
        .list_appointments(&query)
        .await
        .unwrap()
        .data
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.data[0].status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn test_operation_outcome_diagnostics_become_error() {
    let (mut server, client) = setup().await;
    server
        .mock("GET", "/Patient/missing")
        .with_status(404)
        .with_header("content-type", FHIR_JSON)
        .with_body(
            json!({
                "resourceType": "OperationOutcome",
                "issue": [{
                    "severity": "error",
                    "code": "not-found",
                    "diagnostics": "Resource Patient/missing not found"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = client.get_patient("missing").await.unwrap();
    assert!(!response.is_success());
    assert_eq!(response.status, Some(404));
    assert_eq!(
        response.error.as_deref(),
        Some("Resource Patient/missing not found")
    );
}

#[tokio::test]
async fn test_minimal_return_update_succeeds_without_data() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("PUT", "/Appointment/a1")
        .with_status(200)
        .create_async()
        .await;

    let response = client.cancel_appointment("a1").await.unwrap();

    mock.assert_async().await;
    assert!(response.is_success());
    assert_eq!(response.status, Some(200));
}
