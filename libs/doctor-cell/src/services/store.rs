use async_trait::async_trait;

use crate::models::{
    CreateDoctorRequest, Disponibilidad, Doctor, DirectoryError, UpdateDoctorRequest,
};

/// Storage handle for the `Doctor` and `Disponibilidad` tables.
///
/// Each method is one statement; callers that chain several (doctor
/// deletion) get no atomicity across them.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, DirectoryError>;

    async fn find_doctor(&self, dni: &str) -> Result<Option<Doctor>, DirectoryError>;

    async fn insert_doctor(&self, request: &CreateDoctorRequest) -> Result<Doctor, DirectoryError>;

    /// Returns `None` when no row matched.
    async fn update_doctor(
        &self,
        dni: &str,
        request: &UpdateDoctorRequest,
    ) -> Result<Option<Doctor>, DirectoryError>;

    /// Returns the number of doctor rows removed (0 or 1).
    async fn delete_doctor(&self, dni: &str) -> Result<u64, DirectoryError>;

    async fn adjust_total_citas(&self, dni: &str, delta: i32) -> Result<Option<Doctor>, DirectoryError>;

    async fn list_disponibilidad(&self, dni_doctor: &str) -> Result<Vec<Disponibilidad>, DirectoryError>;

    async fn insert_disponibilidad(
        &self,
        dni_doctor: &str,
        dia: chrono::NaiveDate,
        hora: chrono::NaiveTime,
    ) -> Result<Disponibilidad, DirectoryError>;

    /// Returns the number of slots removed.
    async fn delete_disponibilidad_for(&self, dni_doctor: &str) -> Result<u64, DirectoryError>;
}
