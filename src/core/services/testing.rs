//! In-memory server and log capture used by the service unit tests.

use crate::api::client::RemoteResource;
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;
use log::{Level, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Mutex, Once};

enum Scripted {
    Json(Value),
    Text(String),
    Status(u16),
    Unreachable,
}

/// Answers each known URL with a canned response and records every request.
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct ScriptedServer {
    responses: HashMap<String, Scripted>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), Scripted::Json(body));
        self
    }

    pub fn with_text(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), Scripted::Text(body.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Scripted::Status(status));
        self
    }

    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), Scripted::Unreachable);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn answer(&self, url: &str) -> Result<&Scripted, ApiError> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.responses.get(url) {
            Some(Scripted::Status(status)) => Err(ApiError::Rejected {
                status: *status,
                endpoint: url.to_string(),
                message: "scripted failure".to_string(),
            }),
            Some(Scripted::Unreachable) => Err(ApiError::Transport {
                endpoint: url.to_string(),
                message: "connection refused".to_string(),
            }),
            Some(scripted) => Ok(scripted),
            None => Err(ApiError::Rejected {
                status: 404,
                endpoint: url.to_string(),
                message: "no scripted response".to_string(),
            }),
        }
    }
}

#[async_trait]
impl RemoteResource for ScriptedServer {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        match self.answer(url)? {
            Scripted::Json(body) => Ok(body.clone()),
            _ => Err(ApiError::Protocol {
                endpoint: url.to_string(),
                message: "scripted body is not JSON".to_string(),
            }),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, ApiError> {
        match self.answer(url)? {
            Scripted::Text(body) => Ok(body.clone()),
            Scripted::Json(body) => Ok(body.to_string()),
            _ => unreachable!("failures are returned by answer()"),
        }
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records log output per thread, so parallel tests don't see each other's
/// records. `#[tokio::test]` runs on the test's own thread.
struct ThreadLogger;

impl Log for ThreadLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: ThreadLogger = ThreadLogger;
static INSTALL: Once = Once::new();

/// Start capturing log records on the current thread, dropping earlier ones.
pub fn capture_logs() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in unit tests");
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Messages captured on this thread at exactly `level`.
pub fn logged_at(level: Level) -> Vec<String> {
    CAPTURED.with(|captured| {
        captured
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
