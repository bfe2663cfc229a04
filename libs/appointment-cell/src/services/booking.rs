// libs/appointment-cell/src/services/booking.rs
use serde_json::Value;
use tracing::{debug, info, warn};

use shared_database::RestError;

use crate::models::{
    AppointmentError, BookAppointmentRequest, BookingConfirmation, NewCita, NewPaciente,
    WorkflowStep,
};
use crate::services::upstream::CollaboratorClients;
use crate::state::AgendaState;

/// Books an appointment across the patient, doctor, availability and cita
/// services. The steps run one after another with no lock held between
/// them, so two bookings for the same slot can both succeed.
pub struct AppointmentBookingService {
    clients: CollaboratorClients,
}

impl AppointmentBookingService {
    pub fn new(state: &AgendaState) -> Self {
        Self {
            clients: state.collaborators(),
        }
    }

    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<BookingConfirmation, AppointmentError> {
        request.validate()?;

        info!(
            "Booking appointment for patient {} with doctor {} on {} at {}",
            request.dni_paciente, request.dni_doctor, request.fecha, request.hora
        );

        // **Step 1: Patient, created on first booking**
        let paciente_creado = self.ensure_patient(&request).await?;

        // **Steps 2-4**, undoing the patient creation if any of them fails
        match self.book_for_patient(&request).await {
            Ok(cita) => {
                info!("Appointment booked for patient {}", request.dni_paciente);
                Ok(BookingConfirmation {
                    message: "Appointment booked successfully".to_string(),
                    paciente_creado,
                    cita,
                })
            }
            Err(e) => {
                if paciente_creado {
                    self.compensate_patient(&request.dni_paciente).await;
                }
                Err(e)
            }
        }
    }

    /// Returns whether the patient had to be created.
    async fn ensure_patient(&self, request: &BookAppointmentRequest) -> Result<bool, AppointmentError> {
        let existing = self
            .clients
            .find_paciente(&request.dni_paciente)
            .await
            .map_err(AppointmentError::upstream(WorkflowStep::PatientLookup))?;

        if existing.is_some() {
            debug!("Patient {} found", request.dni_paciente);
            return Ok(false);
        }

        let paciente = NewPaciente::try_from(request)?;
        self.clients
            .create_paciente(&paciente)
            .await
            .map_err(AppointmentError::upstream(WorkflowStep::PatientCreation))?;

        info!(
            "Patient {} not found, created (insurance: {})",
            request.dni_paciente,
            paciente.seguro.is_some()
        );
        Ok(true)
    }

    async fn book_for_patient(&self, request: &BookAppointmentRequest) -> Result<Value, AppointmentError> {
        // **Step 2: Doctor must exist**
        self.clients
            .get_doctor(&request.dni_doctor)
            .await
            .map_err(|e| match e {
                // An empty or non-doctor body is a missing doctor as well.
                RestError::NotFound(_) | RestError::Decode(_) => {
                    AppointmentError::DoctorNotFound(request.dni_doctor.clone())
                }
                source => AppointmentError::Upstream { step: WorkflowStep::DoctorLookup, source },
            })?;
        debug!("Doctor {} found", request.dni_doctor);

        // **Step 3: Exact (fecha, hora) slot must be listed**
        let disponibilidad = self
            .clients
            .get_disponibilidad(&request.dni_doctor)
            .await
            .map_err(AppointmentError::upstream(WorkflowStep::AvailabilityLookup))?;

        if !disponibilidad.iter().any(|slot| slot.matches(request.fecha, request.hora)) {
            warn!(
                "Doctor {} has no slot on {} at {} ({} slots listed)",
                request.dni_doctor, request.fecha, request.hora, disponibilidad.len()
            );
            return Err(AppointmentError::SlotUnavailable {
                dni_doctor: request.dni_doctor.clone(),
                fecha: request.fecha,
                hora: request.hora,
            });
        }
        debug!("Doctor {} available on {} at {}", request.dni_doctor, request.fecha, request.hora);

        // **Step 4: Persist the appointment**
        let body = self
            .clients
            .create_cita(&NewCita::from(request))
            .await
            .map_err(AppointmentError::upstream(WorkflowStep::AppointmentCreation))?;

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    /// Best effort: a failure here is logged and the original error stands.
    async fn compensate_patient(&self, dni_paciente: &str) {
        match self.clients.delete_paciente(dni_paciente).await {
            Ok(()) => info!("Rolled back patient {} created by failed booking", dni_paciente),
            Err(e) => warn!("Could not roll back patient {}: {}", dni_paciente, e),
        }
    }
}
