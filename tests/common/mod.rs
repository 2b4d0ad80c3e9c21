#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use money_manager_client::{ApiClient, Config};
use tracing::subscriber::{DefaultGuard, set_default};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Registry, fmt};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const REFRESH_PATH: &str = "/api/user/refresh-token";

struct VecWriter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl std::io::Write for VecWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.lines.lock().unwrap();
        guard.push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn capture_logs() -> (Arc<Mutex<Vec<String>>>, DefaultGuard) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let writer_lines = lines.clone();
    let subscriber = Registry::default().with(
        fmt::Layer::default()
            .with_writer(move || VecWriter {
                lines: writer_lines.clone(),
            })
            .with_target(false)
            .with_level(true)
            .with_ansi(false),
    );
    let guard = set_default(subscriber);
    (lines, guard)
}

pub fn config(server: &MockServer) -> Config {
    Config::new(format!("{}/api", server.uri()))
}

pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(config(server)).expect("client builds")
}

/// Records every landing route handed to the expiry handler.
pub fn recording_handler() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
    let routes = Arc::new(Mutex::new(Vec::new()));
    let sink = routes.clone();
    (routes, move |route: &str| {
        sink.lock().unwrap().push(route.to_string());
    })
}

/// Answers with `status` for the first `failures` calls, then with `ok`.
pub struct FailFirst {
    calls: AtomicUsize,
    failures: usize,
    status: u16,
    ok: ResponseTemplate,
}

impl FailFirst {
    pub fn forbidden(failures: usize, ok: ResponseTemplate) -> Self {
        Self::with_status(403, failures, ok)
    }

    pub fn with_status(status: u16, failures: usize, ok: ResponseTemplate) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures,
            status,
            ok,
        }
    }
}

impl Respond for FailFirst {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            ResponseTemplate::new(self.status)
        } else {
            self.ok.clone()
        }
    }
}
