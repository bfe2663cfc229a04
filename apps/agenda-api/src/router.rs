use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use appointment_cell::AgendaState;

pub fn create_router(state: Arc<AgendaState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Agenda API is running!" }))
        .nest("/citas", appointment_routes(state))
}
