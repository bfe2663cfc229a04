use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveTime};

use shared_models::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Doctor {
    pub dni: String,
    pub nombres: String,
    pub apellidos: String,
    pub especialidad: String,
    pub total_citas: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Disponibilidad {
    pub id: i32,
    pub dia: NaiveDate,
    pub hora: NaiveTime,
    pub dni_doctor: String,
}

impl Disponibilidad {
    pub fn matches(&self, dia: NaiveDate, hora: NaiveTime) -> bool {
        self.dia == dia && self.hora == hora
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub dni: String,
    pub nombres: String,
    pub apellidos: String,
    pub especialidad: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub especialidad: Option<String>,
}

impl UpdateDoctorRequest {
    pub fn is_empty(&self) -> bool {
        self.nombres.is_none() && self.apellidos.is_none() && self.especialidad.is_none()
    }
}

/// Slot body for `POST /disponibilidad/{dni}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub dia: NaiveDate,
    pub hora: NaiveTime,
}

/// Slot body for `POST /disponibilidad`, which carries the doctor in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDisponibilidadRequest {
    pub dia: NaiveDate,
    pub hora: NaiveTime,
    pub dni_doctor: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Doctor {0} not found")]
    DoctorNotFound(String),

    #[error("Doctor {0} already exists")]
    DoctorAlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DoctorNotFound(_) => AppError::NotFound("Doctor not found".to_string()),
            DirectoryError::DoctorAlreadyExists(dni) => {
                AppError::Conflict(format!("Doctor with DNI {} already exists", dni))
            }
            DirectoryError::ValidationError(msg) => AppError::ValidationError(msg),
            DirectoryError::Database(e) => {
                tracing::error!("Directory storage failure: {}", e);
                AppError::Database("Error accessing the doctor directory".to_string())
            }
        }
    }
}
