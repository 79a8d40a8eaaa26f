//! ApRegistry: open sessions, one slot per access point.

use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use leap_codec::{AccessPoint, BitStream};

use crate::error::TcuError;
use crate::session::SessionQueue;

/// A frame picked by [`ApRegistry::next_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledFrame {
    pub ap: AccessPoint,
    pub session: Uuid,
    pub frame: BitStream,
    /// The session had no frames left after this one and was removed.
    pub last: bool,
}

#[derive(Debug, Default)]
struct Slots {
    queues: [Option<SessionQueue>; AccessPoint::COUNT],
    /// Slot index the next round-robin scan starts at.
    cursor: usize,
}

impl Slots {
    fn occupied(&self) -> usize {
        self.queues.iter().filter(|q| q.is_some()).count()
    }
}

/// Thread-safe table of open sessions.
///
/// At most `capacity` access points are served at once; frames are handed
/// out round-robin across them.
#[derive(Debug)]
pub struct ApRegistry {
    capacity: usize,
    slots: Mutex<Slots>,
}

impl ApRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Mutex::new(Slots::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // ── Registration ─────────────────────────────────────────

    pub fn insert(&self, ap: AccessPoint, queue: SessionQueue) -> Result<(), TcuError> {
        let mut slots = self.slots.lock();
        if slots.queues[ap.index()].is_some() {
            return Err(TcuError::SlotOccupied(ap));
        }
        if slots.occupied() >= self.capacity {
            return Err(TcuError::RegistryFull { capacity: self.capacity });
        }
        debug!(%ap, session = %queue.id(), frames = queue.remaining(), "session registered");
        slots.queues[ap.index()] = Some(queue);
        Ok(())
    }

    pub fn remove(&self, ap: AccessPoint) -> Option<SessionQueue> {
        self.slots.lock().queues[ap.index()].take()
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn contains(&self, ap: AccessPoint) -> bool {
        self.slots.lock().queues[ap.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().occupied()
    }

    /// No session is open.
    pub fn is_idle(&self) -> bool {
        self.len() == 0
    }

    // ── Scheduling ───────────────────────────────────────────

    /// Next frame round-robin across open sessions.  A session is dropped as
    /// soon as its last frame is handed out.
    pub fn next_frame(&self) -> Option<ScheduledFrame> {
        let mut slots = self.slots.lock();
        let start = slots.cursor;

        for step in 0..AccessPoint::COUNT {
            let idx = (start + step) % AccessPoint::COUNT;
            let ap = AccessPoint::ALL[idx];
            let Some(queue) = slots.queues[idx].as_mut() else {
                continue;
            };
            let session = queue.id();
            let Some(frame) = queue.next_frame() else {
                // Nothing was ever queued for it.
                slots.queues[idx] = None;
                debug!(%ap, %session, "empty session dropped");
                continue;
            };
            let last = queue.is_empty();
            if last {
                slots.queues[idx] = None;
            }
            slots.cursor = (idx + 1) % AccessPoint::COUNT;
            return Some(ScheduledFrame { ap, session, frame, last });
        }
        None
    }
}
