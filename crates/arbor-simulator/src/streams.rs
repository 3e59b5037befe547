//! Stream wrappers over the simulator's fan-out outputs.

use std::pin::Pin;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::debug;

/// Error from a stream whose producer went away.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The simulator side of the stream was dropped.
    #[error("output stream closed")]
    Closed,
}

/// A subscription to one simulator output stream.
///
/// Wraps a broadcast receiver: lagging subscribers skip missed events and
/// keep going, matching the no-replay contract of the output streams. Also
/// implements [`Stream`] for use with stream combinators.
pub struct EventStream<T> {
    receiver: broadcast::Receiver<T>,
}

impl<T: Clone> EventStream<T> {
    /// Wrap a broadcast subscription.
    #[must_use]
    pub fn new(receiver: broadcast::Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Receive the next event.
    ///
    /// Returns `None` once the stream is closed.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    debug!(missed, "subscriber lagged, events skipped");
                }
            }
        }
    }

    /// Receive without blocking.
    ///
    /// `Ok(None)` means no event is currently buffered.
    pub fn try_recv(&mut self) -> Result<Option<T>, StreamError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Ok(Some(event)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(StreamError::Closed),
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
            }
        }
    }
}

impl<T: Clone + Unpin> Stream for EventStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.try_recv() {
            Ok(Some(event)) => Poll::Ready(Some(event)),
            Ok(None) => {
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Err(StreamError::Closed) => Poll::Ready(None),
        }
    }
}
