//! Step driver
//!
//! Runs the tick loop: samples committed input, invokes the module's step
//! operation, hands the frame to the output surface and commits deferred
//! input. The inter-tick delay is a fixed placeholder cadence, not a
//! frame-rate scheduler.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, info};

use nd_core::error::Result;
use nd_core::{CoreModule, FRAME_BYTES};
use nd_input::InputHandle;

use crate::session::SessionControls;
use crate::stats::TickStats;
use crate::surface::FrameSurface;

/// How many ticks between moving-average log lines.
const STATS_LOG_EVERY: u64 = 15;

/// Drives the module through discrete ticks.
pub struct StepDriver<M: CoreModule, S: FrameSurface> {
    module: Arc<RwLock<M>>,
    input: InputHandle,
    surface: S,
    tick_delay: Duration,
    controls: SessionControls,
    stats: TickStats,
}

impl<M: CoreModule, S: FrameSurface> StepDriver<M, S> {
    pub fn new(
        module: Arc<RwLock<M>>,
        input: InputHandle,
        surface: S,
        tick_delay: Duration,
        controls: SessionControls,
    ) -> Self {
        Self {
            module,
            input,
            surface,
            tick_delay,
            controls,
            stats: TickStats::default(),
        }
    }

    /// Execute exactly one tick.
    ///
    /// Order is fixed: snapshot input, allocate a zeroed frame, step,
    /// present, commit. The commit goes through the same handle the
    /// snapshot came from, so it can never interleave with a tick's read.
    pub fn run_tick(&mut self) -> Result<()> {
        let input = self.input.snapshot();
        let mut frame = vec![0u8; FRAME_BYTES];

        let step_start = Instant::now();
        self.module.write().step(&input, &mut frame)?;
        let step_elapsed = step_start.elapsed();
        debug!(elapsed_ms = step_elapsed.as_millis() as u64, "tick stepped");

        let present_start = Instant::now();
        self.surface.present(&frame)?;
        let present_elapsed = present_start.elapsed();
        debug!(
            elapsed_ms = present_elapsed.as_millis() as u64,
            "frame presented"
        );

        self.input.commit();

        let avg = self.stats.record(step_elapsed + present_elapsed);
        if self.stats.total_ticks() % STATS_LOG_EVERY == 0 {
            info!(
                ticks = self.stats.total_ticks(),
                avg_ms = avg.as_millis() as u64,
                max_ms = self.stats.max().as_millis() as u64,
                "tick timing"
            );
        }
        Ok(())
    }

    /// Run the tick loop until cancelled or a tick fails.
    ///
    /// A paused loop keeps its cadence but skips stepping.
    pub async fn run(&mut self) -> Result<()> {
        info!(delay_ms = self.tick_delay.as_millis() as u64, "tick loop starting");
        loop {
            if self.controls.is_cancelled() {
                break;
            }
            if !self.controls.is_paused() {
                if let Err(e) = self.run_tick() {
                    self.controls.shutdown();
                    return Err(e);
                }
            }
            tokio::select! {
                _ = self.controls.cancelled() => break,
                _ = tokio::time::sleep(self.tick_delay) => {}
            }
        }
        info!("tick loop stopped");
        Ok(())
    }

    /// Timing stats accumulated so far.
    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Access the surface, e.g. to inspect captured frames.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
