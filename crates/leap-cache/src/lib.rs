//! # leap-cache
//!
//! Transmission caches for the LEAP transmitter.
//!
//! - [`DirectionalReplayCache`] remembers, for the last few transmitted
//!   frames, the directional fingerprint each access point would decode, and
//!   authenticates receivers by looking their reported pattern up.
//! - [`FrameDigestCache`] keeps short-lived SHA-256 digests of transmitted
//!   byte frames for single-use lookup.
//!
//! ## Quick start
//! ```rust
//! use leap_cache::{DirectionalReplayCache, Validation};
//! use leap_codec::{AccessPoint, BitStream, HardwarePinMap};
//!
//! let cache = DirectionalReplayCache::new(2, HardwarePinMap::leap_layered(2)?)?;
//! let bits: BitStream = "10100101".parse()?;
//! let _wires = cache.record_and_encode(&bits, AccessPoint::Ap1)?;
//!
//! let seen_at_ap1 = cache.history()[0].slot(AccessPoint::Ap1).clone();
//! assert_eq!(cache.validate(&seen_at_ap1), Validation::Matched(AccessPoint::Ap1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Environment variables
//! | Variable | Default | Description |
//! |---|---|---|
//! | `LEAP_CACHE_CAPACITY` | `10` | Frames kept by the replay cache |
//! | `LEAP_DIGEST_CAPACITY` | `256` | Digests kept by the digest cache |
//! | `LEAP_DIGEST_TTL_SECS` | `10` | Digest lifetime |

pub mod config;
pub mod digest;
pub mod error;
pub mod replay;

pub use config::CacheConfig;
pub use digest::FrameDigestCache;
pub use error::CacheError;
pub use replay::{CacheEntry, DirectionalReplayCache, Validation};
