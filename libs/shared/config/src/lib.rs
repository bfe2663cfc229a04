use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_host: String,
    pub database_port: u16,
    pub database_user: String,
    pub database_password: String,
    pub database_name: String,
    pub service_host: String,
    pub agenda_port: u16,
    pub doctors_port: u16,
    pub paciente_service_url: String,
    pub doctor_service_url: String,
    pub disponibilidad_service_url: String,
    pub cita_service_url: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using default", name);
        default.to_string()
    })
}

fn port_or(name: &str, default: u16) -> u16 {
    match env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid port ({}), using {}", name, value, default);
            default
        }),
        Err(_) => default,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let service_host = var_or("SERVICE_HOST", "localhost");

        let config = Self {
            database_host: var_or("DB_HOST", "localhost"),
            database_port: port_or("DB_PORT", 5432),
            database_user: var_or("DB_USER", "postgres"),
            database_password: env::var("DB_PASSWORD")
                .unwrap_or_else(|_| {
                    warn!("DB_PASSWORD not set, using empty value");
                    String::new()
                }),
            database_name: var_or("DB_NAME", "hospital"),
            agenda_port: port_or("AGENDA_PORT", 8083),
            doctors_port: port_or("DOCTORS_PORT", 8081),
            paciente_service_url: env::var("PACIENTE_SERVICE_URL")
                .unwrap_or_else(|_| format!("http://{}:8082/pacientes", service_host)),
            doctor_service_url: env::var("DOCTOR_SERVICE_URL")
                .unwrap_or_else(|_| format!("http://{}:8081/doctors", service_host)),
            disponibilidad_service_url: env::var("DISPONIBILIDAD_SERVICE_URL")
                .unwrap_or_else(|_| format!("http://{}:8081/disponibilidad", service_host)),
            cita_service_url: env::var("CITA_SERVICE_URL")
                .unwrap_or_else(|_| format!("http://{}:8080/citas", service_host)),
            service_host,
        };

        if !config.is_database_configured() {
            warn!("Database credentials incomplete - check DB_USER and DB_PASSWORD");
        }

        config
    }

    /// Builds a configuration whose collaborators all live under one base URL.
    pub fn with_collaborators_at(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            database_host: "localhost".to_string(),
            database_port: 5432,
            database_user: "postgres".to_string(),
            database_password: String::new(),
            database_name: "hospital".to_string(),
            service_host: "localhost".to_string(),
            agenda_port: 8083,
            doctors_port: 8081,
            paciente_service_url: format!("{}/pacientes", base_url),
            doctor_service_url: format!("{}/doctors", base_url),
            disponibilidad_service_url: format!("{}/disponibilidad", base_url),
            cita_service_url: format!("{}/citas", base_url),
        }
    }

    pub fn is_database_configured(&self) -> bool {
        !self.database_host.is_empty()
            && !self.database_user.is_empty()
            && !self.database_password.is_empty()
    }
}
