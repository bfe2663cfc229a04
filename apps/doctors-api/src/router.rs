use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use doctor_cell::router::{disponibilidad_routes, doctor_routes};
use doctor_cell::DirectoryState;

pub fn create_router(state: Arc<DirectoryState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctors API is running!" }))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/disponibilidad", disponibilidad_routes(state))
}
