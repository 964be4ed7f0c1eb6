//! nes-deck - host driver for a sandboxed NES core
//!
//! Main entry point: loads configuration, resolves the cartridge's
//! content-addressed preimages, and drives the module through ticks while
//! polling telemetry.

use std::path::PathBuf;
use std::time::Duration;

use nd_core::error::FetchError;
use nd_core::{Config, ContentHash, NullModule};
use nd_preimage::{CartridgeRef, DirTransport, FetchTransport, HttpTransport, PreimageResolver};
use nd_session::{NullSurface, Session};

/// Fetch source selected by configuration.
enum Transport {
    Http(HttpTransport),
    Dir(DirTransport),
}

impl FetchTransport for Transport {
    async fn fetch(&self, hash: &ContentHash) -> Result<Vec<u8>, FetchError> {
        match self {
            Self::Http(t) => t.fetch(hash).await,
            Self::Dir(t) => t.fetch(hash).await,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting nes-deck");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    let cartridge = CartridgeRef::parse(&config.cartridge.static_hash, &config.cartridge.dyn_hash)?;

    let transport = match &config.fetch.preimage_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using preimage directory");
            Transport::Dir(DirTransport::new(dir))
        }
        None => {
            tracing::info!(base_url = %config.fetch.base_url, "using content server");
            Transport::Http(HttpTransport::new(config.fetch.base_url.clone()))
        }
    };
    let mut resolver =
        PreimageResolver::new(transport).with_verification(config.fetch.verify_preimages);

    let session = Session::bootstrap(NullModule::new(), &mut resolver, &cartridge).await?;
    if config.session.start_paused {
        session.controls().pause();
    }

    let controls = session.controls();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down");
            controls.shutdown();
        }
    });

    let driver = session.driver(
        NullSurface::new(),
        Duration::from_millis(config.session.tick_delay_ms),
    );
    let poller = session.poller(Duration::from_millis(config.session.poll_interval_ms));
    session.run(driver, poller).await?;

    Ok(())
}
