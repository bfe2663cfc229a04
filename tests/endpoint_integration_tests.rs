/// Endpoint smoke suite for a running deployment.
///
/// Drives `doctors-api` (DOCTORS_BASE_URL, default http://localhost:8081)
/// and `agenda-api` (AGENDA_BASE_URL, default http://localhost:8083) over
/// HTTP. The booking checks additionally need the patient and cita
/// services that `agenda-api` is configured against.
///
/// Run with `cargo run -p endpoint-integration-tests`.

use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

const SMOKE_DOCTOR_DNI: &str = "SMOKE-0001";
const SMOKE_PATIENT_DNI: &str = "SMOKE-P-0001";

type SmokeResult<T> = Result<T, Box<dyn std::error::Error>>;

pub struct ApiTestClient {
    client: Client,
    base_url: String,
}

impl ApiTestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn get(&self, path: &str) -> SmokeResult<Response> {
        Ok(self.client.get(format!("{}{}", self.base_url, path)).send().await?)
    }

    pub async fn post(&self, path: &str, body: Value) -> SmokeResult<Response> {
        Ok(self.client.post(format!("{}{}", self.base_url, path)).json(&body).send().await?)
    }

    pub async fn put(&self, path: &str) -> SmokeResult<Response> {
        Ok(self.client.put(format!("{}{}", self.base_url, path)).send().await?)
    }

    pub async fn delete(&self, path: &str) -> SmokeResult<Response> {
        Ok(self.client.delete(format!("{}{}", self.base_url, path)).send().await?)
    }
}

/// Test results tracker
#[derive(Debug, Default)]
pub struct TestResults {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub failures: Vec<String>,
}

impl TestResults {
    pub fn pass(&mut self, test_name: &str) {
        self.passed += 1;
        println!("✅ {}", test_name);
    }

    pub fn fail(&mut self, test_name: &str, error: &str) {
        self.failed += 1;
        self.failures.push(format!("{}: {}", test_name, error));
        println!("❌ {}: {}", test_name, error);
    }

    pub fn skip(&mut self, test_name: &str, reason: &str) {
        self.skipped += 1;
        println!("⚠️ {} (skipped: {})", test_name, reason);
    }

    /// Records pass/fail for a response against the expected status.
    pub fn expect_status(&mut self, test_name: &str, response: SmokeResult<Response>, expected: StatusCode) {
        match response {
            Ok(resp) if resp.status() == expected => self.pass(test_name),
            Ok(resp) => self.fail(test_name, &format!("Status: {} (expected {})", resp.status(), expected)),
            Err(e) => self.fail(test_name, &e.to_string()),
        }
    }

    pub fn summary(&self) {
        println!("\n📊 Test Summary:");
        println!("✅ Passed: {}", self.passed);
        println!("❌ Failed: {}", self.failed);
        println!("⚠️ Skipped: {}", self.skipped);

        if !self.failures.is_empty() {
            println!("\n🔍 Failures:");
            for failure in &self.failures {
                println!("  - {}", failure);
            }
        }
    }
}

async fn run_doctor_tests(doctors: &ApiTestClient, results: &mut TestResults) {
    println!("\n🩺 Doctor directory");

    // Leftovers from an interrupted run.
    let _ = doctors.delete(&format!("/doctors/{}", SMOKE_DOCTOR_DNI)).await;

    results.expect_status(
        "Create doctor",
        doctors
            .post(
                "/doctors",
                json!({
                    "dni": SMOKE_DOCTOR_DNI,
                    "nombres": "Smoke",
                    "apellidos": "Test",
                    "especialidad": "Medicina General"
                }),
            )
            .await,
        StatusCode::CREATED,
    );

    results.expect_status("List doctors", doctors.get("/doctors").await, StatusCode::OK);

    results.expect_status(
        "Add availability",
        doctors
            .post(
                &format!("/disponibilidad/{}", SMOKE_DOCTOR_DNI),
                json!({ "dia": "2030-01-15", "hora": "09:00:00" }),
            )
            .await,
        StatusCode::CREATED,
    );

    match doctors.get(&format!("/disponibilidad/{}", SMOKE_DOCTOR_DNI)).await {
        Ok(resp) if resp.status() == StatusCode::OK => match resp.json::<Value>().await {
            Ok(body) if body.as_array().map(|a| a.len()) == Some(1) => results.pass("Get availability"),
            Ok(body) => results.fail("Get availability", &format!("Unexpected body: {}", body)),
            Err(e) => results.fail("Get availability", &e.to_string()),
        },
        Ok(resp) => results.fail("Get availability", &format!("Status: {}", resp.status())),
        Err(e) => results.fail("Get availability", &e.to_string()),
    }

    results.expect_status(
        "Increment appointment counter",
        doctors.put(&format!("/doctors/{}/citas/1", SMOKE_DOCTOR_DNI)).await,
        StatusCode::OK,
    );

    results.expect_status(
        "Reject non-numeric counter delta",
        doctors.put(&format!("/doctors/{}/citas/uno", SMOKE_DOCTOR_DNI)).await,
        StatusCode::BAD_REQUEST,
    );
}

async fn run_agenda_tests(agenda: &ApiTestClient, results: &mut TestResults) {
    println!("\n📅 Agenda");

    if agenda.get("/").await.is_err() {
        results.skip("Agenda checks", "agenda-api not reachable");
        return;
    }

    let booking = |dni_doctor: &str, hora: &str| {
        json!({
            "dniPaciente": SMOKE_PATIENT_DNI,
            "nombres": "Paciente",
            "apellidos": "Smoke",
            "fechaNacimiento": "1990-01-01",
            "dniDoctor": dni_doctor,
            "fecha": "2030-01-15",
            "hora": hora
        })
    };

    results.expect_status(
        "Book against unknown doctor",
        agenda.post("/citas/agendar", booking("SMOKE-NOBODY", "09:00:00")).await,
        StatusCode::NOT_FOUND,
    );

    results.expect_status(
        "Book unavailable slot",
        agenda.post("/citas/agendar", booking(SMOKE_DOCTOR_DNI, "23:00:00")).await,
        StatusCode::BAD_REQUEST,
    );

    results.expect_status(
        "Book available slot",
        agenda.post("/citas/agendar", booking(SMOKE_DOCTOR_DNI, "09:00:00")).await,
        StatusCode::CREATED,
    );

    results.expect_status(
        "List patient appointments",
        agenda.get(&format!("/citas/{}", SMOKE_PATIENT_DNI)).await,
        StatusCode::OK,
    );
}

async fn run_cleanup(doctors: &ApiTestClient, results: &mut TestResults) {
    println!("\n🧹 Cleanup");

    results.expect_status(
        "Delete doctor",
        doctors.delete(&format!("/doctors/{}", SMOKE_DOCTOR_DNI)).await,
        StatusCode::OK,
    );

    results.expect_status(
        "Deleted doctor is gone",
        doctors.get(&format!("/doctors/{}", SMOKE_DOCTOR_DNI)).await,
        StatusCode::NOT_FOUND,
    );

    match doctors.get(&format!("/disponibilidad/{}", SMOKE_DOCTOR_DNI)).await {
        Ok(resp) => match resp.json::<Value>().await {
            Ok(body) if body == json!([]) => results.pass("Deleted doctor has no availability"),
            Ok(body) => results.fail("Deleted doctor has no availability", &body.to_string()),
            Err(e) => results.fail("Deleted doctor has no availability", &e.to_string()),
        },
        Err(e) => results.fail("Deleted doctor has no availability", &e.to_string()),
    }
}

pub async fn run_endpoint_tests() -> TestResults {
    let doctors = ApiTestClient::new(
        std::env::var("DOCTORS_BASE_URL").unwrap_or_else(|_| "http://localhost:8081".to_string()),
    );
    let agenda = ApiTestClient::new(
        std::env::var("AGENDA_BASE_URL").unwrap_or_else(|_| "http://localhost:8083".to_string()),
    );
    let mut results = TestResults::default();

    println!("🚀 Starting endpoint smoke tests");

    results.expect_status("Doctors API root", doctors.get("/").await, StatusCode::OK);
    if results.failed > 0 {
        return results;
    }

    run_doctor_tests(&doctors, &mut results).await;
    run_agenda_tests(&agenda, &mut results).await;
    run_cleanup(&doctors, &mut results).await;

    results
}

/// Entry point for endpoint tests
#[tokio::main]
async fn main() {
    let results = run_endpoint_tests().await;
    results.summary();

    if results.failed > 0 {
        std::process::exit(1);
    }
}
