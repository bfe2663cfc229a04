use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use tracing::debug;

use crate::models::{
    CreateDoctorRequest, Disponibilidad, Doctor, DirectoryError, UpdateDoctorRequest,
};
use crate::services::store::DirectoryStore;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

pub struct PgDirectoryStore {
    pool: PgPool,
}

impl PgDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn has_code(err: &sqlx::Error, code: &str) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|c| c == code)
        .unwrap_or(false)
}

#[async_trait]
impl DirectoryStore for PgDirectoryStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, DirectoryError> {
        debug!("SELECT all doctors");

        let doctors = sqlx::query_as::<_, Doctor>(
            "SELECT dni, nombres, apellidos, especialidad, total_citas FROM Doctor ORDER BY dni",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(doctors)
    }

    async fn find_doctor(&self, dni: &str) -> Result<Option<Doctor>, DirectoryError> {
        debug!("SELECT doctor {}", dni);

        let doctor = sqlx::query_as::<_, Doctor>(
            "SELECT dni, nombres, apellidos, especialidad, total_citas FROM Doctor WHERE dni = $1",
        )
        .bind(dni)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }

    async fn insert_doctor(&self, request: &CreateDoctorRequest) -> Result<Doctor, DirectoryError> {
        debug!("INSERT doctor {}", request.dni);

        sqlx::query_as::<_, Doctor>(
            r#"
            INSERT INTO Doctor (dni, nombres, apellidos, especialidad)
            VALUES ($1, $2, $3, $4)
            RETURNING dni, nombres, apellidos, especialidad, total_citas
            "#,
        )
        .bind(&request.dni)
        .bind(&request.nombres)
        .bind(&request.apellidos)
        .bind(&request.especialidad)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if has_code(&e, UNIQUE_VIOLATION) {
                DirectoryError::DoctorAlreadyExists(request.dni.clone())
            } else {
                DirectoryError::Database(e)
            }
        })
    }

    async fn update_doctor(
        &self,
        dni: &str,
        request: &UpdateDoctorRequest,
    ) -> Result<Option<Doctor>, DirectoryError> {
        debug!("UPDATE doctor {}", dni);

        let doctor = sqlx::query_as::<_, Doctor>(
            r#"
            UPDATE Doctor
            SET nombres = COALESCE($2, nombres),
                apellidos = COALESCE($3, apellidos),
                especialidad = COALESCE($4, especialidad)
            WHERE dni = $1
            RETURNING dni, nombres, apellidos, especialidad, total_citas
            "#,
        )
        .bind(dni)
        .bind(request.nombres.as_deref())
        .bind(request.apellidos.as_deref())
        .bind(request.especialidad.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }

    async fn delete_doctor(&self, dni: &str) -> Result<u64, DirectoryError> {
        debug!("DELETE doctor {}", dni);

        let result = sqlx::query("DELETE FROM Doctor WHERE dni = $1")
            .bind(dni)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn adjust_total_citas(&self, dni: &str, delta: i32) -> Result<Option<Doctor>, DirectoryError> {
        debug!("UPDATE doctor {} total_citas by {}", dni, delta);

        let doctor = sqlx::query_as::<_, Doctor>(
            r#"
            UPDATE Doctor
            SET total_citas = total_citas + $1
            WHERE dni = $2
            RETURNING dni, nombres, apellidos, especialidad, total_citas
            "#,
        )
        .bind(delta)
        .bind(dni)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if has_code(&e, NUMERIC_VALUE_OUT_OF_RANGE) {
                DirectoryError::ValidationError(format!(
                    "Appointment counter for doctor {} cannot be adjusted by {}",
                    dni, delta
                ))
            } else {
                DirectoryError::Database(e)
            }
        })?;

        Ok(doctor)
    }

    async fn list_disponibilidad(&self, dni_doctor: &str) -> Result<Vec<Disponibilidad>, DirectoryError> {
        debug!("SELECT disponibilidad for doctor {}", dni_doctor);

        let slots = sqlx::query_as::<_, Disponibilidad>(
            "SELECT id, dia, hora, dni_doctor FROM Disponibilidad WHERE dni_doctor = $1 ORDER BY dia, hora",
        )
        .bind(dni_doctor)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn insert_disponibilidad(
        &self,
        dni_doctor: &str,
        dia: NaiveDate,
        hora: NaiveTime,
    ) -> Result<Disponibilidad, DirectoryError> {
        debug!("INSERT disponibilidad {} {} for doctor {}", dia, hora, dni_doctor);

        sqlx::query_as::<_, Disponibilidad>(
            r#"
            INSERT INTO Disponibilidad (dia, hora, dni_doctor)
            VALUES ($1, $2, $3)
            RETURNING id, dia, hora, dni_doctor
            "#,
        )
        .bind(dia)
        .bind(hora)
        .bind(dni_doctor)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if has_code(&e, FOREIGN_KEY_VIOLATION) {
                DirectoryError::DoctorNotFound(dni_doctor.to_string())
            } else {
                DirectoryError::Database(e)
            }
        })
    }

    async fn delete_disponibilidad_for(&self, dni_doctor: &str) -> Result<u64, DirectoryError> {
        debug!("DELETE disponibilidad for doctor {}", dni_doctor);

        let result = sqlx::query("DELETE FROM Disponibilidad WHERE dni_doctor = $1")
            .bind(dni_doctor)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
