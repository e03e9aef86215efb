//! Bounded event queue with a producer side that never blocks.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crossbeam_channel::{self as chan, Receiver, Sender, TrySendError};
use thiserror::Error;
use tracing::trace;

/// The receiving side of the queue has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event queue closed")]
pub struct QueueClosed;

/// Outcome of a successful [`EventSender::notify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The event is waiting in the queue.
    Queued,
    /// The queue was full and the event was discarded.
    Dropped,
}

/// Producer handle for an event queue created by [`event_queue`].
///
/// Cloning is cheap; all clones share the same queue and drop counter.
#[derive(Debug)]
pub struct EventSender<T> {
    /// Underlying bounded channel.
    tx: Sender<T>,
    /// Events discarded because the queue was full.
    dropped: Arc<AtomicU64>,
}

impl<T> Clone for EventSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            dropped: Arc::clone(&self.dropped),
        }
    }
}

impl<T> EventSender<T> {
    /// Offer an event to the queue without blocking.
    ///
    /// A full queue drops the new event. The sampler coalesces bursts anyway,
    /// so the events already queued carry the same information.
    pub fn notify(&self, value: T) -> Result<Delivery, QueueClosed> {
        match self.tx.try_send(value) {
            Ok(()) => Ok(Delivery::Queued),
            Err(TrySendError::Full(_)) => {
                let n = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                if n == 1 || n.is_multiple_of(1000) {
                    trace!(count = n, "event_queue_drop");
                }
                Ok(Delivery::Dropped)
            }
            Err(TrySendError::Disconnected(_)) => Err(QueueClosed),
        }
    }

    /// Number of events discarded so far because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of events currently waiting in the queue.
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    /// True when no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }
}

/// Create a bounded event queue holding up to `capacity` events.
///
/// A `capacity` of zero is raised to one; a rendezvous channel would make
/// every notify fail while the sampler is busy.
pub fn event_queue<T>(capacity: usize) -> (EventSender<T>, Receiver<T>) {
    let (tx, rx) = chan::bounded(capacity.max(1));
    (
        EventSender {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        },
        rx,
    )
}
