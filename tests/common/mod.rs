//! Shared helpers for the HTTP integration tests.

#![allow(clippy::panic, dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;
use tokio::net::TcpListener;

use feriados_api::api;
use feriados_api::app_state::AppState;
use feriados_api::config::{LogFormat, ServiceConfig};
use feriados_api::domain::FixedClock;
use feriados_api::persistence::JsonFileStorage;
use feriados_api::service::HolidayStore;

/// Shared secret configured on every test server.
pub const API_KEY: &str = "test-key";

/// A server running on an ephemeral port with its own backing file.
#[derive(Debug)]
pub struct TestServer {
    /// `http://127.0.0.1:<port>` plus the configured prefix.
    pub base: String,
    /// Path of the backing document.
    pub file: PathBuf,
    /// HTTP client for the test.
    pub client: reqwest::Client,
    _dir: TempDir,
}

impl TestServer {
    /// Absolute URL for a path under the prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Reads the backing document back as JSON.
    pub async fn file_json(&self) -> serde_json::Value {
        let Ok(bytes) = tokio::fs::read(&self.file).await else {
            panic!("backing document {} is missing", self.file.display());
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("backing document is not valid JSON");
        };
        value
    }
}

/// Today on every test server.
pub fn today() -> NaiveDate {
    let Some(date) = NaiveDate::from_ymd_opt(2025, 6, 1) else {
        panic!("invalid fixed date");
    };
    date
}

/// Starts a server with no prefix and an optional seed document.
pub async fn spawn(seed: Option<&str>) -> TestServer {
    spawn_with_prefix(seed, "").await
}

/// Starts a server mounted under `prefix` (empty for none).
pub async fn spawn_with_prefix(seed: Option<&str>, prefix: &str) -> TestServer {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("could not create temp dir");
    };
    let file = dir.path().join("feriados.json");
    if let Some(seed) = seed
        && std::fs::write(&file, seed).is_err()
    {
        panic!("could not write seed document");
    }

    let config = ServiceConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        holidays_file: file.clone(),
        api_key: API_KEY.to_string(),
        min_year: 1900,
        max_year_offset: 10,
        max_upcoming: 20,
        api_prefix: prefix.to_string(),
        log_format: LogFormat::Text,
    };

    let Ok(store) = HolidayStore::load(JsonFileStorage::new(&file)).await else {
        panic!("seed document failed to load");
    };
    let state = AppState::new(
        Arc::new(store),
        Arc::new(config),
        Arc::new(FixedClock(today())),
    );

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("could not bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no local address");
    };
    let app = api::app(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer {
        base: format!("http://{addr}{prefix}"),
        file,
        client: reqwest::Client::new(),
        _dir: dir,
    }
}

/// Sends `req` and returns the status code and JSON body.
pub async fn send(req: reqwest::RequestBuilder) -> (u16, serde_json::Value) {
    let Ok(res) = req.send().await else {
        panic!("request failed");
    };
    let status = res.status().as_u16();
    let Ok(body) = res.json::<serde_json::Value>().await else {
        panic!("response body is not JSON (status {status})");
    };
    (status, body)
}
