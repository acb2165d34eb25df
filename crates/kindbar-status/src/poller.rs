//! Periodic snapshot refresh task.
//!
//! One failed poll must never stop future polls: tick failures are logged
//! and swallowed, and the timer keeps running until the handle is stopped or
//! the service shuts down.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::StatusError;
use crate::service::ClusterStatusService;

/// Handle for controlling a periodic refresh task.
#[derive(Debug)]
pub struct RefreshHandle {
    running: Arc<AtomicBool>,
}

impl RefreshHandle {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if the refresh task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the refresh task. An in-flight tick completes naturally; its
    /// result is applied by the service's own rules.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Start a periodic refresh task against the given service.
///
/// The first tick fires immediately, then every `interval`. Returns a handle
/// to stop the task.
pub(crate) fn start_refresh_task(
    service: Arc<ClusterStatusService>,
    interval: Duration,
) -> RefreshHandle {
    let handle = RefreshHandle::new();
    handle.running.store(true, Ordering::SeqCst);

    let running = Arc::clone(&handle.running);

    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);

        while running.load(Ordering::SeqCst) {
            timer.tick().await;

            if !running.load(Ordering::SeqCst) {
                break;
            }

            match service.refresh().await {
                Ok(snapshot) => {
                    debug!(clusters = snapshot.len(), "periodic refresh completed");
                }
                Err(StatusError::RefreshInFlight) => {
                    debug!("refresh already in flight, skipping tick");
                }
                Err(StatusError::Stopped) => {
                    running.store(false, Ordering::SeqCst);
                    break;
                }
                Err(e) => {
                    // Swallowed on purpose: the next tick retries.
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    });

    handle
}
