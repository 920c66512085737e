#![allow(dead_code)]

use ask_service::config::{AskConfig, GeminiSettings, DEFAULT_MAX_BODY_BYTES};
use ask_service::services::ChatProvider;
use ask_service::startup::{build_router, AppState};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config;
use std::io;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

pub const TEST_API_KEY: &str = "test-api-key";

pub fn test_config(api_key: Option<&str>) -> AskConfig {
    AskConfig {
        common: Config {
            port: 0,
            ..Config::default()
        },
        gemini: GeminiSettings {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            ..GeminiSettings::default()
        },
        log_level: "error".to_string(),
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
    }
}

pub fn test_app(api_key: Option<&str>, provider: Arc<dyn ChatProvider>) -> Router {
    build_router(AppState::new(test_config(api_key), provider))
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };

    (status, body)
}

pub async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/ask", Body::from(body.to_string())).await
}

/// Log output of a thread-local JSON subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Lines logged at ERROR level.
    pub fn errors(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains("\"level\":\"ERROR\""))
            .map(str::to_string)
            .collect()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(self.0.clone())
    }
}

/// Route this thread's events into memory until the guard drops. Tests run on
/// the current-thread runtime, so the handler logs on the same thread.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .json()
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
