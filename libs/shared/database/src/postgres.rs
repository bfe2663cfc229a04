use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info};

use shared_config::AppConfig;

const MAX_CONNECTIONS: u32 = 10;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS Doctor (
        dni          VARCHAR(20) PRIMARY KEY,
        nombres      VARCHAR(100) NOT NULL,
        apellidos    VARCHAR(100) NOT NULL,
        especialidad VARCHAR(100) NOT NULL,
        total_citas  INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Disponibilidad (
        id         SERIAL PRIMARY KEY,
        dia        DATE NOT NULL,
        hora       TIME NOT NULL,
        dni_doctor VARCHAR(20) NOT NULL REFERENCES Doctor(dni)
    )
    "#,
];

pub fn connect_options(config: &AppConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.database_host)
        .port(config.database_port)
        .username(&config.database_user)
        .password(&config.database_password)
        .database(&config.database_name)
}

/// Opens the process-wide pool. Handlers receive it through their state;
/// nothing else holds a connection.
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        "Connecting to PostgreSQL at {}:{}/{}",
        config.database_host, config.database_port, config.database_name
    );

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(connect_options(config))
        .await?;

    info!("PostgreSQL connection established");
    Ok(pool)
}

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        debug!("Applying schema statement");
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
