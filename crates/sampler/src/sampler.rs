//! Thread-based sampler loop.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use crossbeam_channel::{self as chan, Receiver, Sender, select};
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Shared one-shot stop state.
#[derive(Debug)]
struct StopInner {
    /// Dropping this sender disconnects the sampler's cancel channel.
    tx: Mutex<Option<Sender<()>>>,
    /// Set before the sender is dropped so the loop can check it without blocking.
    stopped: AtomicBool,
}

/// Requests termination of a running [`Sampler`].
///
/// Handles are cheap to clone and may be used from any thread, including from
/// inside the sampler's own callback. Stopping is one-shot: calls after the
/// first are no-ops.
#[derive(Debug, Clone)]
pub struct StopHandle {
    /// State shared with the sampler and every other handle.
    inner: Arc<StopInner>,
}

impl StopHandle {
    /// Create a handle and the cancel channel it controls.
    fn new() -> (Self, Receiver<()>) {
        let (tx, rx) = chan::bounded(0);
        let handle = Self {
            inner: Arc::new(StopInner {
                tx: Mutex::new(Some(tx)),
                stopped: AtomicBool::new(false),
            }),
        };
        (handle, rx)
    }

    /// Ask the sampler to stop. Wakes it if it is blocked waiting for events.
    pub fn stop(&self) {
        let tx = self.inner.tx.lock().take();
        if let Some(tx) = tx {
            self.inner.stopped.store(true, Ordering::SeqCst);
            drop(tx);
            debug!("sampler_stop_requested");
        }
    }

    /// True once [`StopHandle::stop`] has been called on any handle.
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }
}

/// What woke the sampler from its blocking wait.
enum Wake<T> {
    /// An event arrived.
    Event(T),
    /// Every sender is gone and the queue is empty.
    Closed,
    /// A stop was requested.
    Stop,
}

/// Turns bursts of queued events into one rate-limited callback per burst.
///
/// The loop blocks until an event (or a stop request) arrives, drains anything
/// else already queued, calls `on_signal` once with the value that woke it, and
/// then sleeps for the sampling interval before waiting again. Events that land
/// while the callback or the sleep run are picked up by the next cycle, so a
/// burst is never lost, only merged.
pub struct Sampler<T> {
    /// Receiving side of the event queue.
    events: Receiver<T>,
    /// Minimum spacing between callbacks.
    interval: Duration,
    /// Disconnects when a stop is requested.
    cancel: Receiver<()>,
    /// Handle returned to callers that want to stop the loop.
    stop: StopHandle,
}

impl<T> Sampler<T> {
    /// Bind a sampler to `events`, sleeping `interval_ms` after each callback.
    ///
    /// Nothing runs until [`Sampler::run`] is called.
    pub fn new(events: Receiver<T>, interval_ms: u64) -> Self {
        let (stop, cancel) = StopHandle::new();
        Self {
            events,
            interval: Duration::from_millis(interval_ms),
            cancel,
            stop,
        }
    }

    /// The configured sampling interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// A handle that can stop this sampler from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Request termination. Equivalent to `self.stop_handle().stop()`.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Run the sampling loop on the current thread until stopped.
    ///
    /// Returns when a stop has been requested and no event is pending, or when
    /// every [`crate::EventSender`] has been dropped and the queue is empty. A
    /// stop request that finds events still queued flushes them as one final
    /// callback before returning. Panics in `on_signal` propagate to the caller.
    pub fn run<F>(self, mut on_signal: F)
    where
        F: FnMut(T),
    {
        debug!(interval_ms = self.interval.as_millis(), "sampler_start");
        loop {
            if self.stop.is_stopped() {
                if let Some(value) = self.take_burst() {
                    on_signal(value);
                }
                break;
            }

            let wake = select! {
                recv(self.events) -> ev => match ev {
                    Ok(value) => Wake::Event(value),
                    Err(_) => Wake::Closed,
                },
                recv(self.cancel) -> _ => Wake::Stop,
            };
            let value = match wake {
                Wake::Event(value) => value,
                Wake::Stop => continue,
                Wake::Closed => {
                    debug!("sampler_queue_closed");
                    break;
                }
            };

            let coalesced = self.drain();
            trace!(coalesced, "sampler_burst");
            on_signal(value);

            // Events arriving from here on belong to the next cycle.
            thread::sleep(self.interval);
        }
        debug!("sampler_stopped");
    }

    /// Discard everything currently queued, returning how many events went.
    fn drain(&self) -> usize {
        let mut n = 0;
        while self.events.try_recv().is_ok() {
            n += 1;
        }
        n
    }

    /// Non-blocking: collapse whatever is queued into its first value.
    fn take_burst(&self) -> Option<T> {
        let value = self.events.try_recv().ok()?;
        let coalesced = self.drain();
        trace!(coalesced, "sampler_final_burst");
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_queue;

    #[test]
    fn stop_is_idempotent() {
        let (_tx, rx) = event_queue::<()>(8);
        let sampler = Sampler::new(rx, 10);
        let handle = sampler.stop_handle();
        assert!(!handle.is_stopped());
        handle.stop();
        handle.stop();
        sampler.stop();
        assert!(handle.is_stopped());
        assert!(sampler.stop_handle().is_stopped());
    }

    #[test]
    fn stop_disconnects_cancel_channel() {
        let (_tx, rx) = event_queue::<()>(8);
        let sampler = Sampler::new(rx, 10);
        assert_eq!(
            sampler.cancel.try_recv(),
            Err(crossbeam_channel::TryRecvError::Empty)
        );
        sampler.stop();
        assert_eq!(
            sampler.cancel.try_recv(),
            Err(crossbeam_channel::TryRecvError::Disconnected)
        );
    }

    #[test]
    fn drain_reports_discarded_count() {
        let (tx, rx) = event_queue(8);
        for i in 0..5 {
            tx.notify(i).unwrap();
        }
        let sampler = Sampler::new(rx, 10);
        assert_eq!(sampler.take_burst(), Some(0));
        assert_eq!(sampler.drain(), 0);
        assert_eq!(sampler.take_burst(), None);
    }

    #[test]
    fn interval_is_kept_in_millis() {
        let (_tx, rx) = event_queue::<()>(1);
        assert_eq!(Sampler::new(rx, 75).interval(), Duration::from_millis(75));
    }
}
