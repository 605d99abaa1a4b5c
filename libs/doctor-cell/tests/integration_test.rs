// libs/doctor-cell/tests/integration_test.rs

use std::io::Write;
use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use doctor_cell::models::DirectoryError;
use doctor_cell::router::doctor_routes;
use doctor_cell::services::ProviderDirectory;
use shared_models::time::TimeOfDay;

fn t(raw: &str) -> TimeOfDay {
    TimeOfDay::parse(raw).unwrap()
}

fn write_roster(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_roster_file_loads_in_file_order() {
    let file = write_roster(
        r#"[
            {"name": "Dr. Crishen", "intervals": [{"start": "10:00", "end": "2:00 PM"}]},
            {"name": "Dr. Owen", "intervals": [
                {"start": "13:00", "end": "17:00"},
                {"start": "9:00", "end": "12:00"}
            ]}
        ]"#,
    );

    let directory = ProviderDirectory::from_roster_file(file.path()).unwrap();

    let names: Vec<&str> = directory.all_providers().collect();
    assert_eq!(names, vec!["Dr. Crishen", "Dr. Owen"]);
    assert!(directory.is_working("Dr. Crishen", t("14:00")));
    assert!(!directory.is_working("Dr. Crishen", t("14:01")));
    assert!(directory.is_working("Dr. Owen", t("9:30 AM")));
}

#[test]
fn test_roster_file_errors_are_typed() {
    let missing = ProviderDirectory::from_roster_file("/definitely/not/here.json");
    assert_matches!(missing, Err(DirectoryError::Io(_)));

    let garbage = write_roster("{ not json");
    assert_matches!(
        ProviderDirectory::from_roster_file(garbage.path()),
        Err(DirectoryError::Json(_))
    );

    let duplicate = write_roster(
        r#"[
            {"name": "Dr. Owen", "intervals": [{"start": "9:00", "end": "10:00"}]},
            {"name": "Dr. Owen", "intervals": [{"start": "11:00", "end": "12:00"}]}
        ]"#,
    );
    assert_matches!(
        ProviderDirectory::from_roster_file(duplicate.path()),
        Err(DirectoryError::DuplicateProvider(_))
    );
}

#[tokio::test]
async fn test_list_providers_endpoint() {
    let directory = Arc::new(ProviderDirectory::clinic_default().unwrap());
    let app = doctor_routes(directory);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["total"], 5);
    assert_eq!(json["providers"][0]["name"], "Dr. Owen");
    assert_eq!(json["providers"][0]["intervals"][0]["start"], "09:00");
    assert_eq!(json["providers"][0]["intervals"][0]["end"], "11:59");
}

#[tokio::test]
async fn test_get_unknown_provider_is_not_found() {
    let directory = Arc::new(ProviderDirectory::clinic_default().unwrap());
    let app = doctor_routes(directory);

    let request = Request::builder()
        .method("GET")
        .uri("/Dr.%20Nobody")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_provider_by_name() {
    let directory = Arc::new(ProviderDirectory::clinic_default().unwrap());
    let app = doctor_routes(directory);

    let request = Request::builder()
        .method("GET")
        .uri("/Dr.%20Crishen")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["name"], "Dr. Crishen");
    assert_eq!(json["intervals"].as_array().unwrap().len(), 1);
}
