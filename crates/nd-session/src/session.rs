//! Session orchestration
//!
//! Bootstraps a session (resolve, register, activate, start) and runs the
//! tick loop and activity poller concurrently against the same module
//! handle until shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::info;

use nd_core::error::Result;
use nd_core::CoreModule;
use nd_input::InputHandle;
use nd_preimage::{load_cartridge, CartridgeRef, FetchTransport, PreimageResolver};

use crate::driver::StepDriver;
use crate::poller::ActivityPoller;
use crate::surface::FrameSurface;

/// Shared controls for one session's loops.
#[derive(Debug, Clone, Default)]
pub struct SessionControls {
    cancel: CancellationToken,
    paused: Arc<AtomicBool>,
}

impl SessionControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel both the tick loop and the poller.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves when the session is shut down.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn toggle_pause(&self) -> bool {
        let paused = !self.is_paused();
        self.paused.store(paused, Ordering::SeqCst);
        paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

/// One emulation session around a started module.
#[derive(Debug)]
pub struct Session<M: CoreModule> {
    module: Arc<RwLock<M>>,
    input: InputHandle,
    controls: SessionControls,
}

impl<M: CoreModule + 'static> Session<M> {
    /// Resolve and mount the cartridge, then start the module.
    ///
    /// Every setup call completes before this returns; any failure here
    /// aborts the session before the first tick.
    pub async fn bootstrap<T: FetchTransport>(
        mut module: M,
        resolver: &mut PreimageResolver<T>,
        cartridge: &CartridgeRef,
    ) -> Result<Self> {
        load_cartridge(resolver, &mut module, cartridge).await?;
        module.start()?;
        info!("session started");

        Ok(Self {
            module: Arc::new(RwLock::new(module)),
            input: InputHandle::new(),
            controls: SessionControls::new(),
        })
    }

    /// Shared module handle.
    pub fn module(&self) -> Arc<RwLock<M>> {
        self.module.clone()
    }

    /// This session's input buffer handle.
    pub fn input(&self) -> InputHandle {
        self.input.clone()
    }

    pub fn controls(&self) -> SessionControls {
        self.controls.clone()
    }

    /// Build the tick driver for this session.
    pub fn driver<S: FrameSurface>(&self, surface: S, tick_delay: Duration) -> StepDriver<M, S> {
        StepDriver::new(
            self.module.clone(),
            self.input.clone(),
            surface,
            tick_delay,
            self.controls.clone(),
        )
    }

    /// Build the activity poller for this session.
    pub fn poller(&self, interval: Duration) -> ActivityPoller<M> {
        ActivityPoller::new(self.module.clone(), interval, self.controls.clone())
    }

    /// Run driver and poller concurrently until shutdown.
    ///
    /// A driver error shuts the poller down and surfaces; poller errors
    /// are contained inside the poller and never end the session.
    pub async fn run<S: FrameSurface>(
        &self,
        mut driver: StepDriver<M, S>,
        poller: ActivityPoller<M>,
    ) -> Result<()> {
        let poll_task = tokio::spawn(poller.run());
        let result = driver.run().await;
        self.controls.shutdown();
        let _ = poll_task.await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CaptureSurface;
    use nd_core::error::{DeckError, FetchError};
    use nd_core::{ContentHash, NullModule, FRAME_BYTES};
    use nd_preimage::MemoryTransport;

    fn seeded() -> (PreimageResolver<MemoryTransport>, CartridgeRef) {
        let mut transport = MemoryTransport::new();
        let static_hash = transport.insert(vec![1u8; 64]);
        let dyn_hash = transport.insert(vec![2u8; 64]);
        (
            PreimageResolver::new(transport),
            CartridgeRef::new(static_hash, dyn_hash),
        )
    }

    #[tokio::test]
    async fn test_bootstrap_and_single_tick() {
        let (mut resolver, cartridge) = seeded();
        let session = Session::bootstrap(NullModule::new(), &mut resolver, &cartridge)
            .await
            .unwrap();

        let mut driver = session.driver(CaptureSurface::new(), Duration::from_millis(10));
        driver.run_tick().unwrap();
        let frame = driver.surface().last_frame.as_ref().unwrap();
        assert_eq!(frame.len(), FRAME_BYTES);
    }

    #[tokio::test]
    async fn test_bootstrap_fails_on_missing_preimage() {
        let transport = MemoryTransport::new();
        let mut resolver = PreimageResolver::new(transport);
        let cartridge = CartridgeRef::new(
            ContentHash::digest(b"nope"),
            ContentHash::digest(b"also nope"),
        );

        let err = Session::bootstrap(NullModule::new(), &mut resolver, &cartridge)
            .await
            .unwrap_err();
        assert!(matches!(err, DeckError::Fetch(FetchError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_run_until_shutdown() {
        let (mut resolver, cartridge) = seeded();
        let session = Session::bootstrap(NullModule::new(), &mut resolver, &cartridge)
            .await
            .unwrap();

        let driver = session.driver(CaptureSurface::new(), Duration::from_millis(10));
        let poller = session.poller(Duration::from_millis(20));
        let controls = session.controls();

        let shutdown = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(55)).await;
            controls.shutdown();
        });
        session.run(driver, poller).await.unwrap();
        shutdown.await.unwrap();

        assert!(session.module().read().frame_count() >= 3);
    }

    #[test]
    fn test_controls_toggle() {
        let controls = SessionControls::new();
        assert!(!controls.is_paused());
        assert!(controls.toggle_pause());
        assert!(controls.is_paused());
        controls.resume();
        assert!(!controls.is_paused());
        controls.pause();
        assert!(controls.is_paused());
        assert!(!controls.is_cancelled());
        controls.shutdown();
        assert!(controls.is_cancelled());
    }
}
