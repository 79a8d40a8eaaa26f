//! **TransmissionControlUnit**: the loop that keeps the cube lit.
//!
//! Every tick transmits exactly one frame:
//!
//! 1. pick the next session frame round-robin, or a random idle frame aimed
//!    at AP0 when no session is open;
//! 2. encode it through the replay cache (which records its fingerprints);
//! 3. pack the wire-order stream MSB first and write it;
//! 4. post the written bytes to the digest cache and publish the outcome.
//!
//! A failed write is logged and published; the loop carries on with the
//! next frame.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use uuid::Uuid;

use leap_cache::{DirectionalReplayCache, FrameDigestCache};
use leap_codec::{AccessPoint, BitStream, HardwarePinMap};

use crate::config::TcuConfig;
use crate::error::TcuError;
use crate::event_bus::{EventBus, TcuEvent};
use crate::gate::AccessGate;
use crate::payload::PayloadLibrary;
use crate::registry::{ApRegistry, ScheduledFrame};
use crate::transmitter::Transmitter;

/// Report of one successful tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub ap: AccessPoint,
    pub session: Option<Uuid>,
    pub digest: String,
    pub bytes: Vec<u8>,
}

pub struct TransmissionControlUnit {
    cache: Arc<DirectionalReplayCache>,
    digests: Arc<FrameDigestCache>,
    library: Arc<PayloadLibrary>,
    registry: Arc<ApRegistry>,
    events: Arc<EventBus>,
    transmitter: Box<dyn Transmitter>,
    idle_interval: Duration,
    rng: StdRng,
}

impl TransmissionControlUnit {
    /// Build the unit around `transmitter`.  The codec uses the LEAP layered
    /// pin map for `config.dim`; `library` must be segmented for the same
    /// dimension.
    pub fn new(
        config: &TcuConfig,
        library: PayloadLibrary,
        transmitter: Box<dyn Transmitter>,
    ) -> Result<Self, TcuError> {
        let pin_map = HardwarePinMap::leap_layered(config.dim)?;
        let cache = DirectionalReplayCache::with_config(config.dim, pin_map, &config.cache)?;
        let digests = FrameDigestCache::from_config(&config.cache)?;

        if library.dim() != cache.codec().dim() {
            return Err(TcuError::PayloadDimensionMismatch {
                unit:    config.dim,
                payload: library.dim().side(),
            });
        }

        info!(
            dim          = config.dim,
            ap_capacity  = config.ap_capacity,
            idle_ms      = config.idle_interval_ms,
            payloads     = library.len(),
            "transmission control unit ready"
        );

        Ok(Self {
            cache: Arc::new(cache),
            digests: Arc::new(digests),
            library: Arc::new(library),
            registry: Arc::new(ApRegistry::new(config.ap_capacity)),
            events: Arc::new(EventBus::new(config.event_capacity)),
            transmitter,
            idle_interval: config.idle_interval(),
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the idle-frame generator with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Gate sharing this unit's caches, registry and bus.
    pub fn gate(&self) -> AccessGate {
        AccessGate::new(
            Arc::clone(&self.cache),
            Arc::clone(&self.digests),
            Arc::clone(&self.library),
            Arc::clone(&self.registry),
            Arc::clone(&self.events),
        )
    }

    pub fn cache(&self) -> &Arc<DirectionalReplayCache> {
        &self.cache
    }

    pub fn digests(&self) -> &Arc<FrameDigestCache> {
        &self.digests
    }

    pub fn registry(&self) -> &Arc<ApRegistry> {
        &self.registry
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    // ── Transmit loop ────────────────────────────────────────

    /// Transmit one frame.
    pub async fn tick(&mut self) -> Result<Transmission, TcuError> {
        let (ap, session, bits, last) = match self.registry.next_frame() {
            Some(ScheduledFrame { ap, session, frame, last }) => (ap, Some(session), frame, last),
            None => (AccessPoint::Ap0, None, self.idle_frame(), false),
        };

        let wires = self.cache.record_and_encode(&bits, ap)?;
        let bytes = wires.to_bytes();
        let written = self.transmitter.write(&bytes).await;

        let outcome = match written {
            Ok(()) => {
                let digest = self.digests.post(&bytes, ap);
                debug!(%ap, session = ?session, bytes = bytes.len(), "frame transmitted");
                self.events.publish(TcuEvent::FrameTransmitted {
                    ap,
                    session,
                    digest: digest.clone(),
                    bytes: bytes.len(),
                });
                Ok(Transmission { ap, session, digest, bytes })
            }
            Err(e) => {
                warn!(%ap, error = %e, "frame write to transmitter failed");
                self.events.publish(TcuEvent::TransmitFailed {
                    ap,
                    error: e.to_string(),
                });
                Err(e)
            }
        };

        if let (true, Some(session)) = (last, session) {
            info!(%ap, %session, "session complete");
            self.events.publish(TcuEvent::SessionClosed { ap, session });
        }
        outcome
    }

    /// Tick every `idle_interval` until `shutdown` resolves.  Returns the
    /// number of frames written successfully.
    pub async fn run<F>(&mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut sent = 0u64;
        info!(interval_ms = self.idle_interval.as_millis() as u64, "transmit loop started");

        loop {
            if self.tick().await.is_ok() {
                sent += 1;
            }
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.idle_interval) => {}
            }
        }

        self.digests.purge_expired();
        info!(frames = sent, "transmit loop stopped");
        sent
    }

    fn idle_frame(&mut self) -> BitStream {
        let len = self.cache.codec().frame_bits();
        (0..len).map(|_| self.rng.gen_bool(0.5)).collect()
    }
}
