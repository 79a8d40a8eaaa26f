//! LEAP transmission control unit.
//!
//! Reads configuration from environment variables (see [`TcuConfig`]),
//! loads the payload directory, opens the transmitter device and keeps the
//! cube transmitting until SIGINT.
//!
//! The binary exposes no admission listener: nothing outside the process can
//! reach the [`leap_tcu::AccessGate`], so it only ever sends idle frames.
//! Embedders that open sessions take `unit.gate()` and wire it to their own
//! receiver channel before calling `run`.
//!
//! ```bash
//! LEAP_DEVICE=/dev/ttyACM0 \
//! LEAP_PAYLOAD_DIR=/srv/leap/payload \
//! LEAP_LOG_LEVEL=debug \
//!   cargo run --bin leap-tcu --release
//! ```

use anyhow::Context;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use leap_codec::CubeDim;
use leap_tcu::{DeviceTransmitter, PayloadLibrary, TcuConfig, TransmissionControlUnit};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Tracing ───────────────────────────────────────────────────────────────
    let config = TcuConfig::from_env();

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .compact()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        dim     = config.dim,
        device  = %config.device,
        payload = %config.payload_dir,
        "LEAP TCU starting"
    );

    // ── Payload ───────────────────────────────────────────────────────────────
    let dim = CubeDim::new(config.dim)?;
    let library = PayloadLibrary::load(&config.payload_dir, dim)
        .with_context(|| format!("failed to load payload from {}", config.payload_dir))?;

    // ── Transmitter ───────────────────────────────────────────────────────────
    let transmitter = DeviceTransmitter::open(&config.device, config.write_timeout())
        .await
        .with_context(|| format!("unable to open transmitter at {}", config.device))?;

    let mut unit = TransmissionControlUnit::new(&config, library, Box::new(transmitter))?;

    // ── Event log ─────────────────────────────────────────────────────────────
    let mut events = unit.events().subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => debug!(?event, "tcu event"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event log lagging"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    // ── Transmit loop ─────────────────────────────────────────────────────────
    let sent = unit
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "unable to listen for SIGINT");
                std::future::pending::<()>().await;
            }
            info!("received SIGINT, shutting down");
        })
        .await;

    info!(frames = sent, "LEAP TCU shutdown complete");
    Ok(())
}
