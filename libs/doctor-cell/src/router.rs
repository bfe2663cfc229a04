use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::DirectoryState;

pub fn doctor_routes(state: Arc<DirectoryState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route(
            "/{dni}",
            get(handlers::get_doctor)
                .put(handlers::update_doctor)
                .delete(handlers::delete_doctor),
        )
        .route("/{dni}/citas/{delta}", put(handlers::adjust_total_citas))
        .with_state(state)
}

pub fn disponibilidad_routes(state: Arc<DirectoryState>) -> Router {
    Router::new()
        .route("/", post(handlers::create_disponibilidad))
        .route(
            "/{dni}",
            get(handlers::get_disponibilidad).post(handlers::create_disponibilidad_for_doctor),
        )
        .with_state(state)
}
