// libs/doctor-cell/tests/handlers_test.rs

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};

use doctor_cell::handlers::*;
use doctor_cell::models::*;
use doctor_cell::DirectoryState;
use shared_models::{AppError, AppJson};

fn test_state() -> Arc<DirectoryState> {
    Arc::new(DirectoryState::in_memory())
}

fn cardiologist(dni: &str) -> CreateDoctorRequest {
    CreateDoctorRequest {
        dni: dni.to_string(),
        nombres: "Carlos".to_string(),
        apellidos: "Mendoza".to_string(),
        especialidad: "Cardiologia".to_string(),
    }
}

async fn seed_doctor(state: &Arc<DirectoryState>, dni: &str) {
    create_doctor(State(state.clone()), AppJson(cardiologist(dni)))
        .await
        .expect("seed doctor");
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
}

#[tokio::test]
async fn test_create_doctor_success() {
    let state = test_state();

    let result = create_doctor(State(state.clone()), AppJson(cardiologist("40112233"))).await;

    assert!(result.is_ok(), "Expected create_doctor to succeed, but got error: {:?}", result.err());
    let (status, Json(body)) = result.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["dni"], "40112233");
    assert_eq!(body["especialidad"], "Cardiologia");
    assert_eq!(body["total_citas"], 0);
}

#[tokio::test]
async fn test_create_doctor_duplicate_dni() {
    let state = test_state();
    seed_doctor(&state, "40112233").await;

    let result = create_doctor(State(state), AppJson(cardiologist("40112233"))).await;

    assert_matches!(result, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn test_create_doctor_requires_fields() {
    let state = test_state();
    let mut request = cardiologist("40112233");
    request.especialidad = "  ".to_string();

    let result = create_doctor(State(state), AppJson(request)).await;

    assert_matches!(result, Err(AppError::ValidationError(msg)) if msg.contains("especialidad"));
}

#[tokio::test]
async fn test_list_doctors() {
    let state = test_state();
    seed_doctor(&state, "1").await;
    seed_doctor(&state, "2").await;

    let Json(body) = list_doctors(State(state)).await.unwrap();

    assert_eq!(body.as_array().map(|a| a.len()), Some(2));
}

#[tokio::test]
async fn test_get_doctor_not_found() {
    let result = get_doctor(State(test_state()), Path("999".to_string())).await;

    assert_matches!(result, Err(AppError::NotFound(msg)) if msg == "Doctor not found");
}

#[tokio::test]
async fn test_update_doctor_partial() {
    let state = test_state();
    seed_doctor(&state, "40112233").await;

    let request = UpdateDoctorRequest {
        especialidad: Some("Neurologia".to_string()),
        ..Default::default()
    };

    let Json(body) = update_doctor(State(state), Path("40112233".to_string()), AppJson(request))
        .await
        .unwrap();

    assert_eq!(body["especialidad"], "Neurologia");
    assert_eq!(body["nombres"], "Carlos");
}

#[tokio::test]
async fn test_update_doctor_empty_body() {
    let state = test_state();
    seed_doctor(&state, "40112233").await;

    let result = update_doctor(
        State(state),
        Path("40112233".to_string()),
        AppJson(UpdateDoctorRequest::default()),
    )
    .await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_adjust_total_citas_increment_and_decrement() {
    let state = test_state();
    seed_doctor(&state, "40112233").await;

    adjust_total_citas(State(state.clone()), Path(("40112233".to_string(), "1".to_string())))
        .await
        .unwrap();
    adjust_total_citas(State(state.clone()), Path(("40112233".to_string(), "1".to_string())))
        .await
        .unwrap();
    let Json(body) = adjust_total_citas(State(state), Path(("40112233".to_string(), "-1".to_string())))
        .await
        .unwrap();

    assert_eq!(body["total_citas"], 1);
}

#[tokio::test]
async fn test_adjust_total_citas_non_numeric_delta() {
    let state = test_state();
    seed_doctor(&state, "40112233").await;

    let result = adjust_total_citas(State(state), Path(("40112233".to_string(), "abc".to_string()))).await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_adjust_total_citas_overflow_is_rejected() {
    let state = test_state();
    seed_doctor(&state, "40112233").await;

    adjust_total_citas(State(state.clone()), Path(("40112233".to_string(), "1".to_string())))
        .await
        .unwrap();
    let result = adjust_total_citas(
        State(state.clone()),
        Path(("40112233".to_string(), i32::MAX.to_string())),
    )
    .await;

    assert_matches!(result, Err(AppError::ValidationError(_)));

    let Json(body) = get_doctor(State(state), Path("40112233".to_string())).await.unwrap();
    assert_eq!(body["total_citas"], 1);
}

#[tokio::test]
async fn test_adjust_total_citas_unknown_doctor() {
    let result = adjust_total_citas(State(test_state()), Path(("nope".to_string(), "1".to_string()))).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_disponibilidad_allows_duplicate_slots() {
    let state = test_state();
    seed_doctor(&state, "40112233").await;

    for _ in 0..2 {
        let (status, _) = create_disponibilidad_for_doctor(
            State(state.clone()),
            Path("40112233".to_string()),
            AppJson(CreateSlotRequest { dia: date("2024-11-20"), hora: time("10:00:00") }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    let Json(body) = get_disponibilidad(State(state), Path("40112233".to_string())).await.unwrap();
    let slots = body.as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["dia"], "2024-11-20");
    assert_eq!(slots[0]["hora"], "10:00:00");
}

#[tokio::test]
async fn test_disponibilidad_body_route_carries_doctor() {
    let state = test_state();
    seed_doctor(&state, "40112233").await;

    let request = CreateDisponibilidadRequest {
        dia: date("2024-11-21"),
        hora: time("15:30:00"),
        dni_doctor: "40112233".to_string(),
    };
    let (_, Json(body)) = create_disponibilidad(State(state), AppJson(request)).await.unwrap();

    assert_eq!(body["dni_doctor"], "40112233");
    assert_eq!(body["hora"], "15:30:00");
}

#[tokio::test]
async fn test_disponibilidad_for_unknown_doctor() {
    let result = create_disponibilidad_for_doctor(
        State(test_state()),
        Path("ghost".to_string()),
        AppJson(CreateSlotRequest { dia: date("2024-11-20"), hora: time("10:00:00") }),
    )
    .await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_get_disponibilidad_empty_for_unknown_doctor() {
    let Json(body) = get_disponibilidad(State(test_state()), Path("ghost".to_string())).await.unwrap();

    assert_eq!(body, serde_json::json!([]));
}
