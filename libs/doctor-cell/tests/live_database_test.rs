// libs/doctor-cell/tests/live_database_test.rs
//
// Runs the directory against a real PostgreSQL instance configured through
// the DB_* variables. Skipped unless LIVE_DATABASE_TESTS=true.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use doctor_cell::models::CreateDoctorRequest;
use doctor_cell::services::{AvailabilityService, DirectoryStore, DoctorService, PgDirectoryStore};
use doctor_cell::DirectoryError;
use shared_config::AppConfig;
use shared_database::postgres;

fn should_run_live_tests() -> bool {
    std::env::var("LIVE_DATABASE_TESTS").unwrap_or_default() == "true"
}

async fn live_store() -> Arc<PgDirectoryStore> {
    let config = AppConfig::from_env();
    let pool = postgres::connect(&config).await.expect("connect to PostgreSQL");
    postgres::ensure_schema(&pool).await.expect("apply schema");
    Arc::new(PgDirectoryStore::new(pool))
}

#[tokio::test]
async fn test_live_delete_cascades_availability() {
    if !should_run_live_tests() {
        println!("Skipping live database tests (set LIVE_DATABASE_TESTS=true to enable)");
        return;
    }

    let store = live_store().await;
    let doctors = DoctorService::new(store.clone());
    let availability = AvailabilityService::new(store.clone());
    let dni = "LIVE-0001";

    // Leftovers from an interrupted run.
    let _ = doctors.delete_doctor(dni).await;

    doctors
        .create_doctor(CreateDoctorRequest {
            dni: dni.to_string(),
            nombres: "Prueba".to_string(),
            apellidos: "En Vivo".to_string(),
            especialidad: "Medicina General".to_string(),
        })
        .await
        .unwrap();

    let dia = NaiveDate::from_ymd_opt(2030, 1, 15).unwrap();
    let hora = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    availability.add_slot(dni, dia, hora).await.unwrap();
    availability.add_slot(dni, dia, hora).await.unwrap();
    assert_eq!(availability.get_for_doctor(dni).await.unwrap().len(), 2);

    let doctor = doctors.adjust_total_citas(dni, "2").await.unwrap();
    assert_eq!(doctor.total_citas, 2);

    doctors.delete_doctor(dni).await.unwrap();

    assert!(matches!(doctors.get_doctor(dni).await, Err(DirectoryError::DoctorNotFound(_))));
    assert!(store.list_disponibilidad(dni).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_live_duplicate_doctor_is_conflict() {
    if !should_run_live_tests() {
        return;
    }

    let store = live_store().await;
    let doctors = DoctorService::new(store);
    let dni = "LIVE-0002";
    let _ = doctors.delete_doctor(dni).await;

    let request = CreateDoctorRequest {
        dni: dni.to_string(),
        nombres: "Prueba".to_string(),
        apellidos: "Duplicada".to_string(),
        especialidad: "Dermatologia".to_string(),
    };
    doctors.create_doctor(request.clone()).await.unwrap();

    let second = doctors.create_doctor(request).await;
    assert!(matches!(second, Err(DirectoryError::DoctorAlreadyExists(_))));

    doctors.delete_doctor(dni).await.unwrap();
}
