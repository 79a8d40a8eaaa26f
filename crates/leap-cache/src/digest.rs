//! Frame digest cache: short-lived lookup of recently transmitted frames.
//!
//! Every byte frame written to the transmitter is posted here under its
//! SHA-256 hex digest.  A receiver that captured the frame can present the
//! digest instead of the full pattern; a digest is single-use and expires
//! after the configured TTL.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use leap_codec::AccessPoint;

use crate::config::CacheConfig;
use crate::error::CacheError;

#[derive(Debug)]
struct Inner {
    entries: HashMap<String, (AccessPoint, Instant)>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
}

/// Bounded, TTL-limited map digest → access point with FIFO eviction.
#[derive(Debug)]
pub struct FrameDigestCache {
    capacity: usize,
    ttl: Duration,
    inner: Mutex<Inner>,
}

impl FrameDigestCache {
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            ttl,
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
        })
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        Self::new(config.digest_capacity, Duration::from_secs(config.digest_ttl_secs))
    }

    /// Lowercase hex SHA-256 of `bytes`.
    pub fn digest(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }

    /// Remember `bytes` as transmitted towards `ap`.  Returns the digest.
    pub fn post(&self, bytes: &[u8], ap: AccessPoint) -> String {
        let digest = Self::digest(bytes);
        let now = Instant::now();
        let mut inner = self.inner.lock();

        if inner.entries.contains_key(&digest) {
            inner.order.retain(|d| d != &digest);
        }
        while inner.order.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }
        inner.entries.insert(digest.clone(), (ap, now));
        inner.order.push_back(digest.clone());

        debug!(digest = %digest, ap = %ap, "frame digest cached");
        digest
    }

    /// Claim a digest.  Live entries are removed and returned; expired or
    /// unknown digests yield `None`.
    pub fn take(&self, digest: &str) -> Option<AccessPoint> {
        let mut inner = self.inner.lock();
        let found = inner.entries.remove(digest);
        if found.is_some() {
            inner.order.retain(|d| d != digest);
        }

        match found {
            Some((ap, posted)) if posted.elapsed() < self.ttl => {
                info!(digest, ap = %ap, "frame digest claimed");
                Some(ap)
            }
            _ => {
                info!(digest, "frame digest expired or unknown");
                None
            }
        }
    }

    /// Drop every expired entry.  Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let ttl = self.ttl;
        let before = inner.entries.len();
        inner.entries.retain(|_, (_, posted)| posted.elapsed() < ttl);
        let Inner { entries, order } = &mut *inner;
        order.retain(|d| entries.contains_key(d));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_cache(capacity: usize) -> FrameDigestCache {
        FrameDigestCache::new(capacity, Duration::from_secs(60)).unwrap()
    }

    #[test]
    fn digest_is_sha256_hex() {
        assert_eq!(
            FrameDigestCache::digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn take_is_single_use() {
        let cache = live_cache(4);
        let digest = cache.post(&[0xAB, 0xCD], AccessPoint::Ap2);
        assert_eq!(cache.take(&digest), Some(AccessPoint::Ap2));
        assert_eq!(cache.take(&digest), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn unknown_digest_is_none() {
        let cache = live_cache(4);
        assert_eq!(cache.take("deadbeef"), None);
    }

    #[test]
    fn oldest_digest_is_evicted() {
        let cache = live_cache(2);
        let first = cache.post(&[1], AccessPoint::Ap0);
        let second = cache.post(&[2], AccessPoint::Ap1);
        let third = cache.post(&[3], AccessPoint::Ap3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.take(&first), None);
        assert_eq!(cache.take(&second), Some(AccessPoint::Ap1));
        assert_eq!(cache.take(&third), Some(AccessPoint::Ap3));
    }

    #[test]
    fn reposting_refreshes_entry() {
        let cache = live_cache(2);
        let a = cache.post(&[1], AccessPoint::Ap0);
        cache.post(&[2], AccessPoint::Ap0);
        cache.post(&[1], AccessPoint::Ap1);
        cache.post(&[3], AccessPoint::Ap0);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.take(&a), Some(AccessPoint::Ap1));
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let cache = FrameDigestCache::new(4, Duration::ZERO).unwrap();
        let digest = cache.post(&[7], AccessPoint::Ap0);
        assert_eq!(cache.take(&digest), None);
        cache.post(&[8], AccessPoint::Ap0);
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            FrameDigestCache::new(0, Duration::from_secs(1)).unwrap_err(),
            CacheError::InvalidCapacity(0)
        );
    }
}
