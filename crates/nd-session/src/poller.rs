//! Activity poller
//!
//! Periodically asks the module for an opaque telemetry report and logs
//! it. A bad payload is a problem with that single poll, never with the
//! timer: the next poll fires on schedule regardless.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use nd_core::error::TelemetryError;
use nd_core::CoreModule;

use crate::session::SessionControls;

/// Polls the module's activity report on a fixed interval.
pub struct ActivityPoller<M: CoreModule> {
    module: Arc<RwLock<M>>,
    interval: Duration,
    controls: SessionControls,
}

impl<M: CoreModule> ActivityPoller<M> {
    pub fn new(module: Arc<RwLock<M>>, interval: Duration, controls: SessionControls) -> Self {
        Self {
            module,
            interval,
            controls,
        }
    }

    /// Query and decode one activity report.
    pub fn poll_once(&self) -> Result<serde_json::Value, TelemetryError> {
        let raw = self.module.read().query_activity()?;
        let text = String::from_utf8(raw)?;
        let report = serde_json::from_str(&text)?;
        Ok(report)
    }

    /// Run the poll loop until cancelled.
    pub async fn run(self) {
        let mut timer = tokio::time::interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.controls.cancelled() => break,
                _ = timer.tick() => match self.poll_once() {
                    Ok(report) => info!(%report, "activity"),
                    // Contained: log and wait for the next scheduled poll.
                    Err(e) => warn!(error = %e, "activity report discarded"),
                },
            }
        }
    }
}
