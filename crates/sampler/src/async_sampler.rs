//! Tokio flavour of the sampler for callers that already own a runtime.

use std::time::Duration;

use tokio::{sync::mpsc::Receiver, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Async counterpart of [`crate::Sampler`].
///
/// Same contract: one `on_signal` call per burst, at most one per interval,
/// and a cancelled sampler flushes pending events once before returning.
pub struct AsyncSampler<T> {
    /// Receiving side of the event channel.
    events: Receiver<T>,
    /// Minimum spacing between callbacks.
    interval: Duration,
    /// Cancelled to request termination.
    cancel: CancellationToken,
}

impl<T> AsyncSampler<T> {
    /// Bind a sampler to `events`, sleeping `interval_ms` after each callback.
    pub fn new(events: Receiver<T>, interval_ms: u64) -> Self {
        Self {
            events,
            interval: Duration::from_millis(interval_ms),
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the sampler when cancelled. Cancelling twice is harmless.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request termination.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Run the sampling loop until cancelled or until every sender is dropped.
    pub async fn run<F>(mut self, mut on_signal: F)
    where
        F: FnMut(T),
    {
        debug!(interval_ms = self.interval.as_millis(), "async_sampler_start");
        loop {
            if self.cancel.is_cancelled() {
                if let Some(value) = self.take_burst() {
                    on_signal(value);
                }
                break;
            }

            let value = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => continue,
                ev = self.events.recv() => match ev {
                    Some(value) => value,
                    None => {
                        debug!("async_sampler_queue_closed");
                        break;
                    }
                },
            };

            let coalesced = self.drain();
            trace!(coalesced, "async_sampler_burst");
            on_signal(value);
            time::sleep(self.interval).await;
        }
        debug!("async_sampler_stopped");
    }

    /// Discard everything currently queued.
    fn drain(&mut self) -> usize {
        let mut n = 0;
        while self.events.try_recv().is_ok() {
            n += 1;
        }
        n
    }

    /// Collapse whatever is queued into its first value.
    fn take_burst(&mut self) -> Option<T> {
        let value = self.events.try_recv().ok()?;
        let coalesced = self.drain();
        trace!(coalesced, "async_sampler_final_burst");
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use tokio::{sync::mpsc, time::Instant};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_before_start_fires_once() {
        let (tx, rx) = mpsc::channel(100);
        for _ in 0..4 {
            tx.send("changed").await.unwrap();
        }
        let sampler = AsyncSampler::new(rx, 50);
        let token = sampler.cancel_token();
        let mut count = 0;
        sampler
            .run(|_| {
                token.cancel();
                count += 1;
            })
            .await;
        assert_eq!(count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_wakes_idle_sampler() {
        let (_tx, rx) = mpsc::channel::<()>(8);
        let sampler = AsyncSampler::new(rx, 1_000);
        let token = sampler.cancel_token();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let task = tokio::spawn(sampler.run(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        time::sleep(Duration::from_millis(10)).await;
        let start = Instant::now();
        token.cancel();
        token.cancel();
        task.await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(1_000));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn continuous_load_is_rate_limited() {
        let (tx, rx) = mpsc::channel(1000);
        let sampler = AsyncSampler::new(rx, 10);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let start = Instant::now();
        let task = tokio::spawn(sampler.run(move |_: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        for i in 0..200 {
            tx.send(i).await.unwrap();
            time::sleep(Duration::from_millis(1)).await;
        }
        drop(tx);
        task.await.unwrap();

        let elapsed_ms = start.elapsed().as_millis() as usize;
        let n = fired.load(Ordering::SeqCst);
        assert!(n >= 2, "expected several signals, saw {n}");
        assert!(n <= elapsed_ms.div_ceil(10) + 1, "saw {n} in {elapsed_ms}ms");
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_ends_run() {
        let (tx, rx) = mpsc::channel::<()>(8);
        drop(tx);
        let mut count = 0;
        AsyncSampler::new(rx, 10).run(|_| count += 1).await;
        assert_eq!(count, 0);
    }
}
