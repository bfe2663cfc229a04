use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::RwLock;

use crate::models::{
    CreateDoctorRequest, Disponibilidad, Doctor, DirectoryError, UpdateDoctorRequest,
};
use crate::services::store::DirectoryStore;

/// Same outcome as Postgres raising numeric_value_out_of_range.
fn counter_out_of_range(dni: &str, delta: i32) -> DirectoryError {
    DirectoryError::ValidationError(format!(
        "Appointment counter for doctor {} cannot be adjusted by {}",
        dni, delta
    ))
}

#[derive(Default)]
struct Tables {
    doctors: BTreeMap<String, Doctor>,
    disponibilidad: Vec<Disponibilidad>,
    next_slot_id: i32,
}

/// Process-local directory used by tests and local runs without Postgres.
/// Enforces the same key constraints the SQL schema does.
#[derive(Default)]
pub struct InMemoryDirectoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn slot_count(&self) -> usize {
        self.tables.read().await.disponibilidad.len()
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, DirectoryError> {
        Ok(self.tables.read().await.doctors.values().cloned().collect())
    }

    async fn find_doctor(&self, dni: &str) -> Result<Option<Doctor>, DirectoryError> {
        Ok(self.tables.read().await.doctors.get(dni).cloned())
    }

    async fn insert_doctor(&self, request: &CreateDoctorRequest) -> Result<Doctor, DirectoryError> {
        let mut tables = self.tables.write().await;
        if tables.doctors.contains_key(&request.dni) {
            return Err(DirectoryError::DoctorAlreadyExists(request.dni.clone()));
        }

        let doctor = Doctor {
            dni: request.dni.clone(),
            nombres: request.nombres.clone(),
            apellidos: request.apellidos.clone(),
            especialidad: request.especialidad.clone(),
            total_citas: 0,
        };
        tables.doctors.insert(doctor.dni.clone(), doctor.clone());
        Ok(doctor)
    }

    async fn update_doctor(
        &self,
        dni: &str,
        request: &UpdateDoctorRequest,
    ) -> Result<Option<Doctor>, DirectoryError> {
        let mut tables = self.tables.write().await;
        let Some(doctor) = tables.doctors.get_mut(dni) else {
            return Ok(None);
        };

        if let Some(nombres) = &request.nombres {
            doctor.nombres = nombres.clone();
        }
        if let Some(apellidos) = &request.apellidos {
            doctor.apellidos = apellidos.clone();
        }
        if let Some(especialidad) = &request.especialidad {
            doctor.especialidad = especialidad.clone();
        }
        Ok(Some(doctor.clone()))
    }

    async fn delete_doctor(&self, dni: &str) -> Result<u64, DirectoryError> {
        let mut tables = self.tables.write().await;
        // Mirrors the REFERENCES constraint on Disponibilidad.dni_doctor.
        if tables.disponibilidad.iter().any(|d| d.dni_doctor == dni) {
            return Err(DirectoryError::ValidationError(format!(
                "Doctor {} still has availability rows",
                dni
            )));
        }
        Ok(tables.doctors.remove(dni).map(|_| 1).unwrap_or(0))
    }

    async fn adjust_total_citas(&self, dni: &str, delta: i32) -> Result<Option<Doctor>, DirectoryError> {
        let mut tables = self.tables.write().await;
        let Some(doctor) = tables.doctors.get_mut(dni) else {
            return Ok(None);
        };

        doctor.total_citas = doctor
            .total_citas
            .checked_add(delta)
            .ok_or_else(|| counter_out_of_range(dni, delta))?;
        Ok(Some(doctor.clone()))
    }

    async fn list_disponibilidad(&self, dni_doctor: &str) -> Result<Vec<Disponibilidad>, DirectoryError> {
        let tables = self.tables.read().await;
        let mut slots: Vec<Disponibilidad> = tables
            .disponibilidad
            .iter()
            .filter(|d| d.dni_doctor == dni_doctor)
            .cloned()
            .collect();
        slots.sort_by_key(|d| (d.dia, d.hora));
        Ok(slots)
    }

    async fn insert_disponibilidad(
        &self,
        dni_doctor: &str,
        dia: NaiveDate,
        hora: NaiveTime,
    ) -> Result<Disponibilidad, DirectoryError> {
        let mut tables = self.tables.write().await;
        if !tables.doctors.contains_key(dni_doctor) {
            return Err(DirectoryError::DoctorNotFound(dni_doctor.to_string()));
        }

        tables.next_slot_id += 1;
        let slot = Disponibilidad {
            id: tables.next_slot_id,
            dia,
            hora,
            dni_doctor: dni_doctor.to_string(),
        };
        tables.disponibilidad.push(slot.clone());
        Ok(slot)
    }

    async fn delete_disponibilidad_for(&self, dni_doctor: &str) -> Result<u64, DirectoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.disponibilidad.len();
        tables.disponibilidad.retain(|d| d.dni_doctor != dni_doctor);
        Ok((before - tables.disponibilidad.len()) as u64)
    }
}
