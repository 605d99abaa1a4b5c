use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use patient_cell::models::{CreatePatientRequest, Patient, UpdatePatientRequest};
use shared_models::error::AppError;

use crate::models::{
    Appointment, AvailabilityQuery, AvailabilityResponse, BookAppointmentRequest,
    CancelAppointmentRequest,
};
use crate::services::SharedScheduler;

// ==============================================================================
// PATIENT HANDLERS
// ==============================================================================

pub async fn create_patient(
    State(scheduler): State<SharedScheduler>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let patient = scheduler.write().await.register_patient(request)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn list_patients(State(scheduler): State<SharedScheduler>) -> Json<Value> {
    let scheduler = scheduler.read().await;
    let patients = scheduler.patients();

    Json(json!({
        "patients": patients,
        "total": patients.len()
    }))
}

pub async fn get_patient(
    State(scheduler): State<SharedScheduler>,
    Path(patient_id): Path<u32>,
) -> Result<Json<Patient>, AppError> {
    let scheduler = scheduler.read().await;
    let patient = scheduler
        .patient(patient_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Patient ID {} not found", patient_id)))?;

    Ok(Json(patient))
}

pub async fn update_patient(
    State(scheduler): State<SharedScheduler>,
    Path(patient_id): Path<u32>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    let patient = scheduler.write().await.update_patient(patient_id, request)?;
    Ok(Json(patient))
}

pub async fn delete_patient(
    State(scheduler): State<SharedScheduler>,
    Path(patient_id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let (patient, cancelled) = scheduler.write().await.remove_patient(patient_id)?;

    Ok(Json(json!({
        "deleted": patient,
        "appointments_cancelled": cancelled
    })))
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

pub async fn list_appointments(State(scheduler): State<SharedScheduler>) -> Json<Value> {
    let schedule = scheduler.read().await.schedule();

    Json(json!({
        "appointments": schedule,
        "total": schedule.len()
    }))
}

pub async fn check_availability(
    State(scheduler): State<SharedScheduler>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let availability = scheduler.read().await.find_available(&query.time)?;
    Ok(Json(availability))
}

pub async fn book_appointment(
    State(scheduler): State<SharedScheduler>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = scheduler.write().await.book_appointment(request)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn cancel_appointment(
    State(scheduler): State<SharedScheduler>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = scheduler
        .write()
        .await
        .cancel_appointment(&request.provider, &request.time)?;
    Ok(Json(appointment))
}
