// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AgendaState;

pub fn appointment_routes(state: Arc<AgendaState>) -> Router {
    Router::new()
        .route("/agendar", post(handlers::book_appointment))
        .route("/{dni_paciente}", get(handlers::get_patient_appointments))
        .with_state(state)
}
