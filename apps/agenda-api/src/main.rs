use std::net::SocketAddr;
use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info};

mod router;

use appointment_cell::AgendaState;
use shared_config::AppConfig;
use shared_utils::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    init_tracing();

    info!("Starting Agenda API server");

    let config = AppConfig::from_env();
    info!("Patient service: {}", config.paciente_service_url);
    info!("Doctor service: {}", config.doctor_service_url);
    info!("Availability service: {}", config.disponibilidad_service_url);
    info!("Cita service: {}", config.cita_service_url);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.agenda_port));
    let state = Arc::new(AgendaState::new(config));

    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
