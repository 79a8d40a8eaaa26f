//! **DirectionalReplayCache**: what every access point would have seen.
//!
//! Each transmitted frame is encoded for all four orientations and decoded
//! with the canonical table, producing four directional fingerprints.  The
//! fingerprints of the last `capacity` transmissions are kept in a FIFO
//! history.  A receiver proves its position by reporting the pattern it
//! decoded; the slot it matches names the access point it stands at.
//!
//! ```text
//!  bits, target ──▶ encode ×4 ──┬─▶ hardware_map(target) ──▶ transmitter
//!                               └─▶ decode ×4 ──▶ CacheEntry ──▶ history
//!
//!  candidate ──▶ scan history ──▶ Matched(ap) | NotFound
//! ```

use std::collections::VecDeque;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use leap_codec::{AccessPoint, BitStream, HardwarePinMap, SpatialCodec};

use crate::config::CacheConfig;
use crate::error::CacheError;

/// The four fingerprints produced by one transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    slots: [BitStream; AccessPoint::COUNT],
}

impl CacheEntry {
    /// Fingerprint a receiver at `ap` reconstructs.
    pub fn slot(&self, ap: AccessPoint) -> &BitStream {
        &self.slots[ap.index()]
    }

    pub fn slots(&self) -> &[BitStream] {
        &self.slots
    }

    /// First access point whose slot equals `candidate`.
    pub fn find(&self, candidate: &BitStream) -> Option<AccessPoint> {
        AccessPoint::ALL
            .into_iter()
            .find(|ap| self.slot(*ap) == candidate)
    }
}

/// Outcome of [`DirectionalReplayCache::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// The candidate matches a stored fingerprint for this access point.
    Matched(AccessPoint),
    /// No stored fingerprint matches.  A normal outcome, not a fault.
    NotFound,
}

impl Validation {
    pub fn access_point(self) -> Option<AccessPoint> {
        match self {
            Validation::Matched(ap) => Some(ap),
            Validation::NotFound => None,
        }
    }

    pub fn is_match(self) -> bool {
        matches!(self, Validation::Matched(_))
    }
}

/// Bounded history of directional fingerprints.
///
/// One writer (the transmit loop) and any number of concurrent validators.
/// Encoding runs outside the lock; the write lock covers only evict+append,
/// and each validation scans under a read lock, so it always sees a whole
/// history.
#[derive(Debug)]
pub struct DirectionalReplayCache {
    codec: SpatialCodec,
    capacity: usize,
    history: RwLock<VecDeque<CacheEntry>>,
}

impl DirectionalReplayCache {
    /// Cache with the default history capacity.
    pub fn new(dim: usize, pin_map: HardwarePinMap) -> Result<Self, CacheError> {
        Self::with_config(dim, pin_map, &CacheConfig::default())
    }

    pub fn with_config(
        dim: usize,
        pin_map: HardwarePinMap,
        config: &CacheConfig,
    ) -> Result<Self, CacheError> {
        let codec = SpatialCodec::new(dim, pin_map)?;
        Self::from_codec(codec, config.history_capacity)
    }

    /// Wrap an existing codec.
    pub fn from_codec(codec: SpatialCodec, capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        info!(dim = codec.dim().side(), capacity, "replay cache ready");
        Ok(Self {
            codec,
            capacity,
            history: RwLock::new(VecDeque::with_capacity(capacity)),
        })
    }

    pub fn codec(&self) -> &SpatialCodec {
        &self.codec
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.history.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.read().is_empty()
    }

    /// Snapshot of the history, oldest first.
    pub fn history(&self) -> Vec<CacheEntry> {
        self.history.read().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.history.write().clear();
    }

    /// Encode `bits` for every orientation, remember the four fingerprints,
    /// and return the wire-order stream to transmit towards `target`.
    ///
    /// A stream of the wrong length is rejected before the history is
    /// touched.
    pub fn record_and_encode(
        &self,
        bits: &BitStream,
        target: AccessPoint,
    ) -> Result<BitStream, CacheError> {
        let mut hardware = BitStream::default();
        let mut slots: [BitStream; AccessPoint::COUNT] = Default::default();
        for ap in AccessPoint::ALL {
            let frame = self.codec.encode(bits, ap)?;
            if ap == target {
                hardware = self.codec.hardware_map(&frame);
            }
            slots[ap.index()] = self.codec.decode(&frame);
        }

        let mut history = self.history.write();
        let evicted = history.len() >= self.capacity;
        if evicted {
            history.pop_front();
        }
        history.push_back(CacheEntry { slots });
        debug!(target_ap = %target, evicted, len = history.len(), "frame recorded");

        Ok(hardware)
    }

    /// Look `candidate` up in the history.
    ///
    /// Entries are scanned oldest first and the first match wins; which entry
    /// answers when several match is not guaranteed.
    pub fn validate(&self, candidate: &BitStream) -> Validation {
        let history = self.history.read();
        match history.iter().find_map(|entry| entry.find(candidate)) {
            Some(ap) => {
                info!(ap = %ap, key = %candidate, "access point validated");
                Validation::Matched(ap)
            }
            None => {
                info!(key = %candidate, "access point key revoked");
                Validation::NotFound
            }
        }
    }
}
