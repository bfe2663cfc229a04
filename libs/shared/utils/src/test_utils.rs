use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;

pub struct TestConfig {
    pub collaborators_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            collaborators_url: "http://localhost:9999".to_string(),
        }
    }
}

impl TestConfig {
    pub fn for_mock_server(mock_server: &MockServer) -> Self {
        Self {
            collaborators_url: mock_server.uri(),
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::with_collaborators_at(&self.collaborators_url)
    }
}

pub struct MockServiceResponses;

impl MockServiceResponses {
    pub fn paciente_response(dni: &str) -> Value {
        json!({
            "_id": dni,
            "nombres": "Ana",
            "apellidos": "Quispe",
            "fecha_nacimiento": "1990-05-14"
        })
    }

    pub fn doctor_response(dni: &str, especialidad: &str) -> Value {
        json!({
            "dni": dni,
            "nombres": "Carlos",
            "apellidos": "Mendoza",
            "especialidad": especialidad,
            "total_citas": 3
        })
    }

    pub fn disponibilidad_response(id: i32, dni_doctor: &str, dia: &str, hora: &str) -> Value {
        json!({
            "id": id,
            "dia": dia,
            "hora": hora,
            "dni_doctor": dni_doctor
        })
    }

    pub fn cita_response(id: i64, dni_doctor: &str, fecha: &str, hora: &str) -> Value {
        json!({
            "id": id,
            "fecha": fecha,
            "hora": hora,
            "especialidad": "Cardiologia",
            "dniDoctor": dni_doctor
        })
    }
}

/// Mounts the happy-path collaborator routes for one patient/doctor pair.
pub struct CollaboratorMocks;

impl CollaboratorMocks {
    pub async fn paciente_exists(mock_server: &MockServer, dni: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/pacientes/{}", dni)))
            .respond_with(ResponseTemplate::new(200).set_body_json(MockServiceResponses::paciente_response(dni)))
            .mount(mock_server)
            .await;
    }

    pub async fn paciente_missing(mock_server: &MockServer, dni: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/pacientes/{}", dni)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Paciente no encontrado"})))
            .mount(mock_server)
            .await;
    }

    pub async fn doctor_exists(mock_server: &MockServer, dni: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/doctors/{}", dni)))
            .respond_with(ResponseTemplate::new(200).set_body_json(MockServiceResponses::doctor_response(dni, "Cardiologia")))
            .mount(mock_server)
            .await;
    }

    pub async fn doctor_missing(mock_server: &MockServer, dni: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/doctors/{}", dni)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Doctor not found"})))
            .mount(mock_server)
            .await;
    }

    pub async fn disponibilidad(mock_server: &MockServer, dni_doctor: &str, slots: &[(&str, &str)]) {
        let body: Vec<Value> = slots
            .iter()
            .enumerate()
            .map(|(i, (dia, hora))| MockServiceResponses::disponibilidad_response(i as i32 + 1, dni_doctor, dia, hora))
            .collect();

        Mock::given(method("GET"))
            .and(path(format!("/disponibilidad/{}", dni_doctor)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(body)))
            .mount(mock_server)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let app_config = TestConfig::default().to_app_config();

        assert_eq!(app_config.doctor_service_url, "http://localhost:9999/doctors");
        assert_eq!(app_config.cita_service_url, "http://localhost:9999/citas");
    }

    #[test]
    fn fixtures_use_collaborator_field_names() {
        let cita = MockServiceResponses::cita_response(1, "D1", "2024-11-20", "10:00:00");
        assert_eq!(cita["dniDoctor"], "D1");

        let paciente = MockServiceResponses::paciente_response("P1");
        assert_eq!(paciente["_id"], "P1");
    }
}
