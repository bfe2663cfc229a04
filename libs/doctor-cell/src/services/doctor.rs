use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::{CreateDoctorRequest, Doctor, DirectoryError, UpdateDoctorRequest};
use crate::services::store::DirectoryStore;

pub struct DoctorService {
    store: Arc<dyn DirectoryStore>,
}

fn require(field: &str, value: &str) -> Result<(), DirectoryError> {
    if value.trim().is_empty() {
        return Err(DirectoryError::ValidationError(format!("{} is required", field)));
    }
    Ok(())
}

/// Parses the counter delta from its path segment (`1`, `-1`, `+2`).
pub fn parse_delta(raw: &str) -> Result<i32, DirectoryError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DirectoryError::ValidationError(format!("Invalid appointment delta: {}", raw)))
}

impl DoctorService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DirectoryError> {
        debug!("Listing doctors");
        self.store.list_doctors().await
    }

    pub async fn get_doctor(&self, dni: &str) -> Result<Doctor, DirectoryError> {
        debug!("Fetching doctor: {}", dni);

        self.store
            .find_doctor(dni)
            .await?
            .ok_or_else(|| DirectoryError::DoctorNotFound(dni.to_string()))
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DirectoryError> {
        require("dni", &request.dni)?;
        require("nombres", &request.nombres)?;
        require("apellidos", &request.apellidos)?;
        require("especialidad", &request.especialidad)?;

        let doctor = self.store.insert_doctor(&request).await?;
        info!("Doctor {} created ({})", doctor.dni, doctor.especialidad);
        Ok(doctor)
    }

    pub async fn update_doctor(
        &self,
        dni: &str,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, DirectoryError> {
        if request.is_empty() {
            return Err(DirectoryError::ValidationError("No fields to update".to_string()));
        }

        let doctor = self
            .store
            .update_doctor(dni, &request)
            .await?
            .ok_or_else(|| DirectoryError::DoctorNotFound(dni.to_string()))?;

        info!("Doctor {} updated", dni);
        Ok(doctor)
    }

    /// Removes the doctor's availability rows, then the doctor. The two
    /// statements run independently; a failure between them leaves the
    /// doctor without slots.
    pub async fn delete_doctor(&self, dni: &str) -> Result<(), DirectoryError> {
        if self.store.find_doctor(dni).await?.is_none() {
            return Err(DirectoryError::DoctorNotFound(dni.to_string()));
        }

        let removed_slots = self.store.delete_disponibilidad_for(dni).await?;
        debug!("Removed {} availability rows for doctor {}", removed_slots, dni);

        if self.store.delete_doctor(dni).await? == 0 {
            warn!("Doctor {} disappeared before its row could be deleted", dni);
            return Err(DirectoryError::DoctorNotFound(dni.to_string()));
        }

        info!("Doctor {} deleted with {} availability rows", dni, removed_slots);
        Ok(())
    }

    pub async fn adjust_total_citas(&self, dni: &str, raw_delta: &str) -> Result<Doctor, DirectoryError> {
        let delta = parse_delta(raw_delta)?;

        let doctor = self
            .store
            .adjust_total_citas(dni, delta)
            .await?
            .ok_or_else(|| DirectoryError::DoctorNotFound(dni.to_string()))?;

        info!("Doctor {} total_citas now {}", dni, doctor.total_citas);
        Ok(doctor)
    }
}
