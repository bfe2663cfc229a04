use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info};

mod router;

use doctor_cell::DirectoryState;
use shared_config::AppConfig;
use shared_database::postgres;
use shared_utils::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    init_tracing();

    info!("Starting Doctors API server");

    let config = AppConfig::from_env();

    let pool = postgres::connect(&config)
        .await
        .context("connecting to PostgreSQL")?;
    postgres::ensure_schema(&pool)
        .await
        .context("creating Doctor/Disponibilidad tables")?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(DirectoryState::postgres(pool));

    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.doctors_port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
