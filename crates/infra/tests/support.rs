//! Shared fixtures for the infra integration suites.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use edgemgmt_core::{Clock, DebugObserver};
use edgemgmt_domain::{AuthMode, DebugData, EdgeConfig};
use edgemgmt_infra::RequestExecutor;
use parking_lot::Mutex;
use wiremock::MockServer;

pub const USERNAME: &str = "ops@example.com";
pub const PASSWORD: &str = "hunter2";
/// base64("ops@example.com:hunter2")
pub const BASIC_HEADER: &str = "Basic b3BzQGV4YW1wbGUuY29tOmh1bnRlcjI=";

pub fn endpoint(server: &MockServer) -> String {
    format!("{}/v1", server.uri())
}

pub fn basic_config(server: &MockServer) -> EdgeConfig {
    EdgeConfig::new("acme", AuthMode::Basic { username: USERNAME.into(), password: PASSWORD.into() })
        .with_endpoint(endpoint(server))
}

pub fn basic_executor(server: &MockServer) -> RequestExecutor {
    RequestExecutor::new(basic_config(server)).expect("executor should build")
}

/// Observer that keeps every snapshot it is handed.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    seen: Arc<Mutex<Vec<DebugData>>>,
}

impl RecordingObserver {
    pub fn snapshots(&self) -> Vec<DebugData> {
        self.seen.lock().clone()
    }
}

impl DebugObserver for RecordingObserver {
    fn on_transaction(&self, data: &DebugData) {
        self.seen.lock().push(data.clone());
    }
}

/// Clock whose time only moves when a test says so.
#[derive(Default)]
pub struct MockClock(AtomicI64);

impl MockClock {
    pub fn at(unix: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(unix)))
    }

    pub fn advance(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_unix(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
