// libs/appointment-cell/src/services/listing.rs
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{AppointmentError, Cita, CitaConDoctor, WorkflowStep};
use crate::services::upstream::CollaboratorClients;
use crate::state::AgendaState;

pub struct AppointmentListingService {
    clients: CollaboratorClients,
}

impl AppointmentListingService {
    pub fn new(state: &AgendaState) -> Self {
        Self {
            clients: state.collaborators(),
        }
    }

    /// Patient appointments with doctor details attached. Doctor lookups run
    /// concurrently; one that fails only degrades its own entry.
    pub async fn get_patient_appointments(
        &self,
        dni_paciente: &str,
    ) -> Result<Vec<CitaConDoctor>, AppointmentError> {
        let citas = self
            .clients
            .list_citas(dni_paciente)
            .await
            .map_err(AppointmentError::upstream(WorkflowStep::AppointmentListing))?;

        if citas.is_empty() {
            return Err(AppointmentError::NoAppointments(dni_paciente.to_string()));
        }

        debug!("Enriching {} appointments for patient {}", citas.len(), dni_paciente);

        let enriched = join_all(citas.into_iter().map(|raw| self.enrich(raw))).await;

        let degraded = enriched.iter().filter(|c| c.is_degraded()).count();
        if degraded > 0 {
            warn!("{} of {} appointments for patient {} returned without doctor data", degraded, enriched.len(), dni_paciente);
        }

        Ok(enriched)
    }

    async fn enrich(&self, raw: Value) -> CitaConDoctor {
        let cita = match serde_json::from_value::<Cita>(raw.clone()) {
            Ok(cita) => cita,
            Err(e) => {
                warn!("Unreadable appointment record {}: {}", raw, e);
                return CitaConDoctor::degraded(raw);
            }
        };

        match self.clients.get_doctor(&cita.dni_doctor).await {
            Ok(doctor) => CitaConDoctor::enriched(cita, doctor),
            Err(e) => {
                warn!("Failed to fetch doctor {} for appointment: {}", cita.dni_doctor, e);
                CitaConDoctor::degraded(raw)
            }
        }
    }
}
