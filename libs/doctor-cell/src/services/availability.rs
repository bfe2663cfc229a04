use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::models::{Disponibilidad, DirectoryError};
use crate::services::store::DirectoryStore;

pub struct AvailabilityService {
    store: Arc<dyn DirectoryStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Slots for a doctor, ordered by day then time. An unknown doctor
    /// yields an empty list.
    pub async fn get_for_doctor(&self, dni_doctor: &str) -> Result<Vec<Disponibilidad>, DirectoryError> {
        debug!("Fetching availability for doctor: {}", dni_doctor);
        self.store.list_disponibilidad(dni_doctor).await
    }

    /// Adds a slot. Duplicates are accepted.
    pub async fn add_slot(
        &self,
        dni_doctor: &str,
        dia: NaiveDate,
        hora: NaiveTime,
    ) -> Result<Disponibilidad, DirectoryError> {
        if dni_doctor.trim().is_empty() {
            return Err(DirectoryError::ValidationError("dni_doctor is required".to_string()));
        }

        let slot = self.store.insert_disponibilidad(dni_doctor, dia, hora).await?;
        info!("Availability {} {} added for doctor {}", slot.dia, slot.hora, dni_doctor);
        Ok(slot)
    }
}
