//! In-process stand-in for the monitor device.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use tank_dashboard::common::AppState;
use tank_dashboard::config::Config;
use tank_dashboard::monitor::MonitorClient;

pub const NOMINAL_READING: &str = r#"{"temperature":21.37,"waterLevel":80,"pumpStatus":"OFF","anomalyStatus":"NOMINAL","anomalyValue":0.02}"#;
pub const ANOMALY_READING: &str = r#"{"temperature":23.5,"waterLevel":64,"pumpStatus":"ON","anomalyStatus":"ANOMALY","anomalyValue":0.87}"#;
pub const TWO_ENTRY_LOG: &str = r#"[
    {"timestamp":"2024-05-01 10:00:00","temperature":20.5,"waterLevel":70,"pumpStatus":"ON","anomalyStatus":"NOMINAL","anomalyValue":0.1},
    {"timestamp":"2024-05-01 10:01:00","temperature":20.75,"waterLevel":68,"pumpStatus":"OFF","anomalyStatus":"ANOMALY","anomalyValue":0.8}
]"#;

#[derive(Default)]
pub struct Hits {
    pub data: AtomicUsize,
    pub log: AtomicUsize,
    pub clear: AtomicUsize,
}

impl Hits {
    pub fn data(&self) -> usize {
        self.data.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> usize {
        self.log.load(Ordering::SeqCst)
    }

    pub fn clear(&self) -> usize {
        self.clear.load(Ordering::SeqCst)
    }
}

struct Responses {
    data: (StatusCode, String),
    log: (StatusCode, String),
    clear: StatusCode,
}

#[derive(Clone)]
struct Shared {
    hits: Arc<Hits>,
    responses: Arc<Mutex<Responses>>,
}

pub struct FakeMonitor {
    pub base_url: String,
    pub hits: Arc<Hits>,
    responses: Arc<Mutex<Responses>>,
}

impl FakeMonitor {
    pub async fn start() -> Self {
        let hits = Arc::new(Hits::default());
        let responses = Arc::new(Mutex::new(Responses {
            data: (StatusCode::OK, NOMINAL_READING.to_string()),
            log: (StatusCode::OK, TWO_ENTRY_LOG.to_string()),
            clear: StatusCode::OK,
        }));
        let shared = Shared {
            hits: hits.clone(),
            responses: responses.clone(),
        };

        let router = Router::new()
            .route("/data", get(data))
            .route("/log", get(log))
            .route("/clear", post(clear))
            .with_state(shared);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            responses,
        }
    }

    pub fn set_data(&self, status: StatusCode, body: &str) {
        self.responses.lock().unwrap().data = (status, body.to_string());
    }

    pub fn set_log(&self, status: StatusCode, body: &str) {
        self.responses.lock().unwrap().log = (status, body.to_string());
    }

    pub fn set_clear_status(&self, status: StatusCode) {
        self.responses.lock().unwrap().clear = status;
    }

    pub fn config(&self) -> Config {
        Config {
            monitor_base_url: self.base_url.clone(),
            ..Config::default()
        }
    }

    pub fn state(&self) -> AppState {
        state_for(self.config())
    }
}

pub fn state_for(config: Config) -> AppState {
    let monitor = MonitorClient::new(&config).unwrap();
    AppState::new(config, monitor)
}

/// State pointing at a port nothing listens on.
pub fn unreachable_state() -> AppState {
    state_for(Config {
        monitor_base_url: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    })
}

async fn data(State(shared): State<Shared>) -> (StatusCode, String) {
    shared.hits.data.fetch_add(1, Ordering::SeqCst);
    shared.responses.lock().unwrap().data.clone()
}

async fn log(State(shared): State<Shared>) -> (StatusCode, String) {
    shared.hits.log.fetch_add(1, Ordering::SeqCst);
    shared.responses.lock().unwrap().log.clone()
}

async fn clear(State(shared): State<Shared>) -> StatusCode {
    shared.hits.clear.fetch_add(1, Ordering::SeqCst);
    let mut responses = shared.responses.lock().unwrap();
    if responses.clear.is_success() {
        responses.log = (StatusCode::OK, "[]".to_string());
    }
    responses.clear
}
