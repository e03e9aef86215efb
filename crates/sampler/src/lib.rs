//! Coalescing event sampler.
//!
//! A [`Sampler`] sits between a producer that emits events at an arbitrary,
//! bursty rate and a consumer action that must run at a bounded rate. Every
//! burst of events observed on the queue results in exactly one call to the
//! consumer, and consecutive calls are separated by at least the sampling
//! interval.
//!
//! Overview:
//! - Create a queue with [`event_queue`]. Producers hold the cloneable
//!   [`EventSender`], whose [`EventSender::notify`] never blocks.
//! - Bind a [`Sampler`] to the receiving end with [`Sampler::new`] and call
//!   [`Sampler::run`] on a dedicated thread.
//! - Stop it from anywhere with a [`StopHandle`], or drop every sender.
//!
//! [`AsyncSampler`] provides the same loop for callers already running on a
//! Tokio runtime.

mod async_sampler;
mod queue;
mod sampler;

pub use async_sampler::AsyncSampler;
pub use queue::{Delivery, EventSender, QueueClosed, event_queue};
pub use sampler::{Sampler, StopHandle};

/// Default number of events the queue buffers before dropping new ones.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Default sampling interval in milliseconds.
///
/// Nothing a person reads on a status bar needs to change faster than this.
pub const DEFAULT_INTERVAL_MS: u64 = 100;
