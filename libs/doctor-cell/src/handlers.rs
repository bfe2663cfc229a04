use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::{AppError, AppJson};

use crate::models::{
    CreateDisponibilidadRequest, CreateDoctorRequest, CreateSlotRequest, UpdateDoctorRequest,
};
use crate::services::{AvailabilityService, DoctorService};
use crate::state::DirectoryState;

// ==============================================================================
// DOCTOR HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<DirectoryState>>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    let doctors = doctor_service.list_doctors().await?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<DirectoryState>>,
    AppJson(request): AppJson<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    let doctor = doctor_service.create_doctor(request).await?;

    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<DirectoryState>>,
    Path(dni): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    let doctor = doctor_service.get_doctor(&dni).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<DirectoryState>>,
    Path(dni): Path<String>,
    AppJson(request): AppJson<UpdateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    let doctor = doctor_service.update_doctor(&dni, request).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<DirectoryState>>,
    Path(dni): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    doctor_service.delete_doctor(&dni).await?;

    Ok(Json(json!({
        "message": "Doctor deleted successfully",
        "dni": dni
    })))
}

/// The delta stays a string until the service parses it so a bad value is
/// reported as a validation error instead of a path rejection.
#[axum::debug_handler]
pub async fn adjust_total_citas(
    State(state): State<Arc<DirectoryState>>,
    Path((dni, delta)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    let doctor = doctor_service.adjust_total_citas(&dni, &delta).await?;

    Ok(Json(json!(doctor)))
}

// ==============================================================================
// DISPONIBILIDAD HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_disponibilidad(
    State(state): State<Arc<DirectoryState>>,
    Path(dni): Path<String>,
) -> Result<Json<Value>, AppError> {
    let availability_service = AvailabilityService::new(state.store.clone());

    let slots = availability_service.get_for_doctor(&dni).await?;

    Ok(Json(json!(slots)))
}

#[axum::debug_handler]
pub async fn create_disponibilidad_for_doctor(
    State(state): State<Arc<DirectoryState>>,
    Path(dni): Path<String>,
    AppJson(request): AppJson<CreateSlotRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let availability_service = AvailabilityService::new(state.store.clone());

    let slot = availability_service.add_slot(&dni, request.dia, request.hora).await?;

    Ok((StatusCode::CREATED, Json(json!(slot))))
}

#[axum::debug_handler]
pub async fn create_disponibilidad(
    State(state): State<Arc<DirectoryState>>,
    AppJson(request): AppJson<CreateDisponibilidadRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let availability_service = AvailabilityService::new(state.store.clone());

    let slot = availability_service
        .add_slot(&request.dni_doctor, request.dia, request.hora)
        .await?;

    Ok((StatusCode::CREATED, Json(json!(slot))))
}
