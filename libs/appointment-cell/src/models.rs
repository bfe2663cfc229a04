use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use doctor_cell::models::Doctor;
use shared_database::RestError;

// ==============================================================================
// BOOKING MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seguro {
    pub tipo: String,
    pub vencimiento: NaiveDate,
}

/// Body of `POST /citas/agendar`. The demographic fields are only read
/// when the patient does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub dni_paciente: String,
    #[serde(default)]
    pub nombres: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<NaiveDate>,
    pub dni_doctor: String,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    #[serde(default)]
    pub seguro: Option<Seguro>,
}

impl BookAppointmentRequest {
    pub fn validate(&self) -> Result<(), AppointmentError> {
        if self.dni_paciente.trim().is_empty() {
            return Err(AppointmentError::ValidationError("dniPaciente is required".to_string()));
        }
        if self.dni_doctor.trim().is_empty() {
            return Err(AppointmentError::ValidationError("dniDoctor is required".to_string()));
        }
        Ok(())
    }
}

/// Patient document as the patient service stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPaciente {
    #[serde(rename = "_id")]
    pub dni: String,
    pub nombres: String,
    pub apellidos: String,
    pub fecha_nacimiento: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seguro: Option<Seguro>,
}

fn required<T: Clone>(field: &str, value: &Option<T>) -> Result<T, AppointmentError> {
    value.clone().ok_or_else(|| {
        AppointmentError::ValidationError(format!("{} is required to register a new patient", field))
    })
}

impl TryFrom<&BookAppointmentRequest> for NewPaciente {
    type Error = AppointmentError;

    fn try_from(request: &BookAppointmentRequest) -> Result<Self, Self::Error> {
        let nombres = required("nombres", &request.nombres)?;
        let apellidos = required("apellidos", &request.apellidos)?;
        if nombres.trim().is_empty() || apellidos.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "nombres and apellidos are required to register a new patient".to_string(),
            ));
        }

        Ok(Self {
            dni: request.dni_paciente.clone(),
            nombres,
            apellidos,
            fecha_nacimiento: required("fechaNacimiento", &request.fecha_nacimiento)?,
            seguro: request.seguro.clone(),
        })
    }
}

/// Body sent to `POST /citas/{dniPaciente}` on the cita service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCita {
    pub dni_paciente: String,
    pub dni_doctor: String,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
}

impl From<&BookAppointmentRequest> for NewCita {
    fn from(request: &BookAppointmentRequest) -> Self {
        Self {
            dni_paciente: request.dni_paciente.clone(),
            dni_doctor: request.dni_doctor.clone(),
            fecha: request.fecha,
            hora: request.hora,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub message: String,
    pub paciente_creado: bool,
    pub cita: Value,
}

// ==============================================================================
// LISTING MODELS
// ==============================================================================

/// Appointment as returned by the cita service. Items that do not fit
/// this shape are passed through untouched by the listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cita {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidad: Option<String>,
    pub dni_doctor: String,
}

/// Public doctor fields; the appointment counter stays private.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorSummary {
    pub nombres: String,
    pub apellidos: String,
    pub especialidad: String,
}

impl From<Doctor> for DoctorSummary {
    fn from(doctor: Doctor) -> Self {
        Self {
            nombres: doctor.nombres,
            apellidos: doctor.apellidos,
            especialidad: doctor.especialidad,
        }
    }
}

pub const DOCTOR_LOOKUP_PLACEHOLDER: &str = "Error fetching doctor data";

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CitaConDoctor {
    Enriched {
        fecha: NaiveDate,
        hora: NaiveTime,
        doctor: DoctorSummary,
    },
    /// The item could not be read or its doctor lookup failed; the stored
    /// appointment fields are passed through as received.
    Degraded {
        #[serde(flatten)]
        cita: Map<String, Value>,
        doctor: String,
    },
}

impl CitaConDoctor {
    pub fn enriched(cita: Cita, doctor: Doctor) -> Self {
        CitaConDoctor::Enriched {
            fecha: cita.fecha,
            hora: cita.hora,
            doctor: doctor.into(),
        }
    }

    pub fn degraded(raw: Value) -> Self {
        let cita = match raw {
            Value::Object(fields) => fields,
            other => Map::from_iter([("cita".to_string(), other)]),
        };
        CitaConDoctor::Degraded {
            cita,
            doctor: DOCTOR_LOOKUP_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, CitaConDoctor::Degraded { .. })
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    PatientLookup,
    PatientCreation,
    DoctorLookup,
    AvailabilityLookup,
    AppointmentCreation,
    AppointmentListing,
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            WorkflowStep::PatientLookup => "patient lookup",
            WorkflowStep::PatientCreation => "patient creation",
            WorkflowStep::DoctorLookup => "doctor lookup",
            WorkflowStep::AvailabilityLookup => "availability lookup",
            WorkflowStep::AppointmentCreation => "appointment creation",
            WorkflowStep::AppointmentListing => "appointment listing",
        };
        write!(f, "{}", step)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Doctor {0} not found")]
    DoctorNotFound(String),

    #[error("Doctor {dni_doctor} is not available on {fecha} at {hora}")]
    SlotUnavailable {
        dni_doctor: String,
        fecha: NaiveDate,
        hora: NaiveTime,
    },

    #[error("No appointments found for patient {0}")]
    NoAppointments(String),

    #[error("{step} failed: {source}")]
    Upstream {
        step: WorkflowStep,
        #[source]
        source: RestError,
    },
}

impl AppointmentError {
    pub fn upstream(step: WorkflowStep) -> impl FnOnce(RestError) -> AppointmentError {
        move |source| AppointmentError::Upstream { step, source }
    }
}
