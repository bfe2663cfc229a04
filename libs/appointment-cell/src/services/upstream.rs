// libs/appointment-cell/src/services/upstream.rs
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use doctor_cell::models::{Disponibilidad, Doctor};
use shared_config::AppConfig;
use shared_database::{RestClient, RestError};

use crate::models::{NewCita, NewPaciente};

/// Typed access to the patient, doctor, availability and cita services.
#[derive(Clone)]
pub struct CollaboratorClients {
    rest: RestClient,
    paciente_url: String,
    doctor_url: String,
    disponibilidad_url: String,
    cita_url: String,
}

/// Appends `segments` to `base`, percent-encoding each one so a DNI can
/// never reach a different route.
fn resource_url(base: &str, segments: &[&str]) -> Result<String, RestError> {
    let mut url = Url::parse(base).map_err(|e| RestError::InvalidUrl(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| RestError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}

impl CollaboratorClients {
    pub fn new(config: &AppConfig, rest: RestClient) -> Self {
        Self {
            rest,
            paciente_url: config.paciente_service_url.trim_end_matches('/').to_string(),
            doctor_url: config.doctor_service_url.trim_end_matches('/').to_string(),
            disponibilidad_url: config.disponibilidad_service_url.trim_end_matches('/').to_string(),
            cita_url: config.cita_service_url.trim_end_matches('/').to_string(),
        }
    }

    /// `Ok(None)` when the patient service answers 404.
    pub async fn find_paciente(&self, dni: &str) -> Result<Option<Value>, RestError> {
        debug!("Looking up patient {}", dni);

        match self.rest.get::<Value>(&resource_url(&self.paciente_url, &[dni])?).await {
            Ok(paciente) => Ok(Some(paciente)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_paciente(&self, paciente: &NewPaciente) -> Result<String, RestError> {
        debug!("Creating patient {}", paciente.dni);
        self.rest.post(&self.paciente_url, paciente).await
    }

    pub async fn delete_paciente(&self, dni: &str) -> Result<(), RestError> {
        debug!("Deleting patient {}", dni);
        self.rest.delete(&resource_url(&self.paciente_url, &[dni])?).await
    }

    pub async fn get_doctor(&self, dni: &str) -> Result<Doctor, RestError> {
        self.rest.get(&resource_url(&self.doctor_url, &[dni])?).await
    }

    pub async fn get_disponibilidad(&self, dni_doctor: &str) -> Result<Vec<Disponibilidad>, RestError> {
        self.rest.get(&resource_url(&self.disponibilidad_url, &[dni_doctor])?).await
    }

    pub async fn create_cita(&self, cita: &NewCita) -> Result<String, RestError> {
        self.rest.post(&resource_url(&self.cita_url, &[cita.dni_paciente.as_str()])?, cita).await
    }

    /// Raw items; each one is interpreted separately by the listing.
    pub async fn list_citas(&self, dni_paciente: &str) -> Result<Vec<Value>, RestError> {
        self.rest.get(&resource_url(&self.cita_url, &["paciente", dni_paciente])?).await
    }
}
