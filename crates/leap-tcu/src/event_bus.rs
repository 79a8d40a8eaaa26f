use tokio::sync::broadcast;
use uuid::Uuid;

use leap_codec::AccessPoint;

/// Events produced by the transmit loop and the access gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TcuEvent {
    /// A frame reached the transmitter.
    FrameTransmitted {
        ap: AccessPoint,
        /// `None` for idle frames.
        session: Option<Uuid>,
        /// SHA-256 hex of the bytes written.
        digest: String,
        bytes: usize,
    },

    /// A reported pattern matched a cached fingerprint.
    ApValidated { ap: AccessPoint },

    /// A reported pattern matched nothing in the cache.
    ApRejected,

    /// A payload session was queued for an access point.
    SessionOpened {
        ap: AccessPoint,
        session: Uuid,
        frames: usize,
    },

    /// The last frame of a session was handed to the transmitter.
    SessionClosed { ap: AccessPoint, session: Uuid },

    /// The transmitter refused a frame.  The loop keeps running.
    TransmitFailed { ap: AccessPoint, error: String },
}

/// Pub/sub bus fanning TCU events out to observers.
///
/// Publishing never blocks; subscribers that fall more than `capacity`
/// events behind observe `RecvError::Lagged`.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<TcuEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. No-op if there are no subscribers.
    pub fn publish(&self, event: TcuEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TcuEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(TcuEvent::ApValidated { ap: AccessPoint::Ap2 });

        assert_eq!(rx.try_recv().unwrap(), TcuEvent::ApValidated { ap: AccessPoint::Ap2 });
    }

    #[test]
    fn no_subscribers_no_panic() {
        let bus = EventBus::new(16);
        bus.publish(TcuEvent::ApRejected);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(TcuEvent::SessionClosed {
            ap: AccessPoint::Ap1,
            session: Uuid::new_v4(),
        });

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let bus = EventBus::new(0);
        let mut rx = bus.subscribe();
        bus.publish(TcuEvent::ApRejected);
        assert!(rx.try_recv().is_ok());
    }
}
