// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use shared_models::{AppError, AppJson};

use crate::models::{AppointmentError, BookAppointmentRequest};
use crate::services::{AppointmentBookingService, AppointmentListingService};
use crate::state::AgendaState;

const BOOKING_FAILED: &str = "Error booking the appointment";
const LISTING_FAILED: &str = "Error fetching the patient's appointments";

/// Not-found and validation outcomes keep their message; anything else is
/// logged and collapsed to `fallback`.
fn to_app_error(err: AppointmentError, fallback: &str) -> AppError {
    match err {
        AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
        AppointmentError::DoctorNotFound(_) => AppError::NotFound("Doctor not found".to_string()),
        e @ AppointmentError::SlotUnavailable { .. } => AppError::ValidationError(e.to_string()),
        e @ AppointmentError::NoAppointments(_) => AppError::NotFound(e.to_string()),
        e @ AppointmentError::Upstream { .. } => {
            error!("{}: {}", fallback, e);
            AppError::Internal(fallback.to_string())
        }
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AgendaState>>,
    AppJson(request): AppJson<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let confirmation = booking_service
        .book_appointment(request)
        .await
        .map_err(|e| to_app_error(e, BOOKING_FAILED))?;

    Ok((StatusCode::CREATED, Json(json!(confirmation))))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<Arc<AgendaState>>,
    Path(dni_paciente): Path<String>,
) -> Result<Json<Value>, AppError> {
    let listing_service = AppointmentListingService::new(&state);

    let citas = listing_service
        .get_patient_appointments(&dni_paciente)
        .await
        .map_err(|e| to_app_error(e, LISTING_FAILED))?;

    Ok(Json(json!(citas)))
}
