//! AccessGate: admits receivers that prove their position.
//!
//! A receiver reports the pattern it decoded from a recent frame (its APR
//! code).  The replay cache tells which access point produced that
//! fingerprint; the gate then queues the requested payload for that access
//! point.
//!
//! ```text
//!  APR code ──▶ DirectionalReplayCache::validate ──┬─ Matched(ap) ─▶ SessionQueue ─▶ ApRegistry
//!                                                  └─ NotFound    ─▶ Rejected
//! ```

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use leap_cache::{DirectionalReplayCache, FrameDigestCache, Validation};
use leap_codec::{AccessPoint, BitStream};

use crate::error::TcuError;
use crate::event_bus::{EventBus, TcuEvent};
use crate::payload::PayloadLibrary;
use crate::registry::ApRegistry;
use crate::session::SessionQueue;

/// Outcome of an admission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted { ap: AccessPoint, session: Uuid },
    Rejected,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Shared handles needed to admit a receiver.  Cheap to clone.
#[derive(Debug, Clone)]
pub struct AccessGate {
    cache: Arc<DirectionalReplayCache>,
    digests: Arc<FrameDigestCache>,
    library: Arc<PayloadLibrary>,
    registry: Arc<ApRegistry>,
    events: Arc<EventBus>,
}

impl AccessGate {
    pub fn new(
        cache: Arc<DirectionalReplayCache>,
        digests: Arc<FrameDigestCache>,
        library: Arc<PayloadLibrary>,
        registry: Arc<ApRegistry>,
        events: Arc<EventBus>,
    ) -> Self {
        Self { cache, digests, library, registry, events }
    }

    /// Validate `candidate` and, on a match, open a session streaming
    /// `requested` files to the matched access point.
    ///
    /// A pattern that matches nothing is `Ok(Admission::Rejected)`.  Errors
    /// are reserved for a matched receiver whose session cannot be opened.
    pub fn admit(
        &self,
        candidate: &BitStream,
        requested: &[String],
    ) -> Result<Admission, TcuError> {
        match self.cache.validate(candidate) {
            Validation::Matched(ap) => {
                self.events.publish(TcuEvent::ApValidated { ap });
                self.open_session(ap, requested)
            }
            Validation::NotFound => {
                self.events.publish(TcuEvent::ApRejected);
                Ok(Admission::Rejected)
            }
        }
    }

    /// Admit by the digest of a captured frame instead of its pattern.
    ///
    /// Digests are single-use; a second claim is rejected.
    pub fn admit_digest(
        &self,
        digest: &str,
        requested: &[String],
    ) -> Result<Admission, TcuError> {
        match self.digests.take(digest) {
            Some(ap) => {
                self.events.publish(TcuEvent::ApValidated { ap });
                self.open_session(ap, requested)
            }
            None => {
                self.events.publish(TcuEvent::ApRejected);
                Ok(Admission::Rejected)
            }
        }
    }

    fn open_session(&self, ap: AccessPoint, requested: &[String]) -> Result<Admission, TcuError> {
        let queue = SessionQueue::new(requested, &self.library)?;
        let session = queue.id();
        let frames = queue.remaining();

        if let Err(e) = self.registry.insert(ap, queue) {
            warn!(%ap, error = %e, "session refused");
            return Err(e);
        }
        info!(%ap, %session, frames, files = ?requested, "session opened");
        self.events.publish(TcuEvent::SessionOpened { ap, session, frames });
        Ok(Admission::Admitted { ap, session })
    }
}
