//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;
pub mod scripted;

use geoform::PipelineSnapshot;
use parking_lot::Mutex;
use std::io;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Wait (up to 2s) until the published snapshot satisfies `done`.
pub async fn wait_until<F>(rx: &mut watch::Receiver<PipelineSnapshot>, done: F) -> PipelineSnapshot
where
    F: FnMut(&PipelineSnapshot) -> bool,
{
    let snapshot = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(done))
        .await
        .expect("timed out waiting for pipeline snapshot")
        .expect("pipeline dropped while waiting");
    (*snapshot).clone()
}

/// Let spawned fetch tasks run to completion on the current-thread runtime.
pub async fn drain_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's events (debug and up) into a [`CapturedLogs`] sink.
///
/// Only covers tasks polled on the current thread, so pair it with the
/// default current-thread `#[tokio::test]` runtime.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = geoform::logging::subscriber(EnvFilter::new("geoform=debug"), move || {
        sink.clone()
    });
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
