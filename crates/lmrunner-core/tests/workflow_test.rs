#![allow(clippy::unwrap_used)]
// End-to-end runs of the script workflow against a mock portal.

use std::sync::Mutex;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lmrunner_api::TransportConfig;
use lmrunner_core::{
    CoreError, Device, InputRequest, LmClient, Notice, Prompter, RunTarget, ScriptRunner,
    SessionState, Settings,
};

// ── Helpers ─────────────────────────────────────────────────────────

const API_PATH: &str = "/santaba/rest";

async fn setup() -> (MockServer, LmClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}{API_PATH}", server.uri())).unwrap();
    let http = TransportConfig::default()
        .build_bearer_client(&SecretString::from("tok".to_string()), "3")
        .unwrap();
    (server, LmClient::with_client(http, base_url))
}

fn settings() -> Settings {
    Settings {
        page_size: 10,
        poll_interval: Duration::from_millis(20),
        poll_timeout: Some(Duration::from_secs(5)),
        ..Settings::default()
    }
}

/// Searches by name for a fixed term and picks the first hit.
struct ByNamePrompter {
    term: &'static str,
    notices: Mutex<Vec<String>>,
}

impl ByNamePrompter {
    fn new(term: &'static str) -> Self {
        Self {
            term,
            notices: Mutex::new(Vec::new()),
        }
    }
}

impl Prompter for ByNamePrompter {
    fn pick(&self, _prompt: &str, items: &[String]) -> Result<Option<usize>, CoreError> {
        Ok(items
            .iter()
            .position(|i| i == "By Name")
            .or(Some(0)))
    }

    fn input(&self, _request: &InputRequest<'_>) -> Result<Option<String>, CoreError> {
        Ok(Some(self.term.to_owned()))
    }

    fn confirm(&self, _prompt: &str, _default: bool) -> Result<bool, CoreError> {
        Ok(false)
    }

    fn notify(&self, _level: Notice, message: &str) {
        self.notices.lock().unwrap().push(message.to_owned());
    }
}

// ── Runs ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_new_device_run_end_to_end() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/device/devices")))
        .and(query_param("filter", r#"displayName~"router1""#))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "displayName": "router1-east", "id": 42, "currentCollectorId": 7 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/debug/")))
        .and(query_param("collectorId", "7"))
        .and(body_json(json!({ "cmdline": "!groovy hostId=42 \n println 'hi'" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionId": "S1" })))
        .expect(1)
        .mount(&server)
        .await;

    // First poll: nothing yet. Later polls: output.
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/debug/S1")))
        .and(query_param("collectorId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/debug/S1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "hi\n" })))
        .mount(&server)
        .await;

    let settings = settings();
    let state = SessionState::new();
    let prompter = ByNamePrompter::new("router1");

    let outcome = ScriptRunner::new(&client, &prompter, &settings, &state)
        .run(RunTarget::NewDevice, "println 'hi'")
        .await
        .unwrap();

    assert_eq!(outcome.output, "hi\n");
    assert_eq!(outcome.session.session_id, "S1");
    assert_eq!(outcome.device.id, "42");
    assert_eq!(state.selected().map(|d| d.label), Some("router1-east".into()));
    assert!(!state.is_busy());

    let notices = prompter.notices.lock().unwrap().clone();
    assert!(notices.iter().any(|n| n == "You selected: router1-east"));
    assert!(notices.iter().any(|n| n.starts_with("Script is running")));
}

#[tokio::test]
async fn test_current_device_run_skips_search() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/device/devices")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/debug/")))
        .and(query_param("collectorId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionId": "S9" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/debug/S9")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "done" })))
        .mount(&server)
        .await;

    let settings = settings();
    let state = SessionState::with_selected(Some(Device {
        label: "db1".into(),
        id: "11".into(),
        collector_id: "3".into(),
    }));
    let prompter = ByNamePrompter::new("unused");

    let outcome = ScriptRunner::new(&client, &prompter, &settings, &state)
        .run(RunTarget::CurrentDevice, "return 1")
        .await
        .unwrap();

    assert_eq!(outcome.output, "done");
    assert_eq!(outcome.device.label, "db1");
}

#[tokio::test]
async fn test_output_request_failure_ends_run() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/debug/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionId": "S2" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/debug/S2")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errorMessage": "collector unavailable"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = settings();
    let state = SessionState::with_selected(Some(Device {
        label: "db1".into(),
        id: "11".into(),
        collector_id: "3".into(),
    }));
    let prompter = ByNamePrompter::new("unused");

    let result = ScriptRunner::new(&client, &prompter, &settings, &state)
        .run(RunTarget::CurrentDevice, "return 1")
        .await;

    assert!(result.is_err());
    assert!(!state.is_busy());
}

#[tokio::test]
async fn test_empty_search_with_declined_retry_is_cancelled() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/device/devices")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = settings();
    let state = SessionState::new();
    let prompter = ByNamePrompter::new("nothing");

    let err = ScriptRunner::new(&client, &prompter, &settings, &state)
        .run(RunTarget::NewDevice, "return 1")
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Cancelled));
    assert_eq!(state.selected(), None);
}
