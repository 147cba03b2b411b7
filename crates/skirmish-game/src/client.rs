//! Client references: where broadcast frames are delivered.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use skirmish_state::Frame;
use tokio::sync::mpsc;

/// Counter for generating unique client ids.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// A process-wide unique identity for one connected client endpoint.
///
/// Frames are delivered at most once per `ClientId` per broadcast, even
/// when the same client is attached under several players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// Receiving half of a client's frame channel.
pub type FrameReceiver = mpsc::UnboundedReceiver<Frame>;

/// A handle to one client endpoint: a unique id plus the sending half of
/// its frame channel.
///
/// Cheap to clone. The game actor treats the channel's closure (the
/// receiver being dropped) as the client's death — that is the monitor
/// signal, delivered to the actor exactly once per installed monitor.
#[derive(Debug, Clone)]
pub struct ClientRef {
    id: ClientId,
    frames: mpsc::UnboundedSender<Frame>,
}

impl ClientRef {
    /// Creates a fresh client endpoint: the reference to hand to a game,
    /// and the receiver to consume frames from.
    pub fn channel() -> (ClientRef, FrameReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = ClientRef {
            id: ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed)),
            frames: tx,
        };
        (client, rx)
    }

    /// This client's unique id.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Delivers a frame, best-effort. A dead or slow client never blocks
    /// the sender; failures are silently dropped (the monitor will fire).
    pub(crate) fn send(&self, frame: Frame) {
        let _ = self.frames.send(frame);
    }

    /// Resolves when the client's receiver has been dropped.
    pub(crate) async fn closed(&self) {
        self.frames.closed().await;
    }
}
