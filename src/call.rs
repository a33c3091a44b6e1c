//! Single-settlement operation results with two delivery modes.
//!
//! Every adapter operation returns a [`Call`]. The caller picks the mode:
//! `.await` it like any future, or hand it a completion handler with
//! [`Call::on_complete`]. Both modes consume the call and observe the one
//! shared outcome, so an invocation settles exactly once with either a
//! result or an error, never both and never neither.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::error::{Error, Result};

/// The in-flight (or already settled) result of one store operation.
///
/// Dispatched operations run eagerly on the runtime, so a `Call` keeps
/// making progress whether or not anyone is waiting on it; awaiting or
/// attaching a handler after the operation finished still observes the
/// final state.
pub struct Call<T> {
    state: State<T>,
}

enum State<T> {
    /// Settled before dispatch (validation or encoding failure).
    Ready(Option<Result<T>>),

    /// Operation running on the runtime.
    Running(JoinHandle<Result<T>>),
}

impl<T: Send + 'static> Call<T> {
    /// Creates a call that is already settled, without touching the
    /// runtime or the underlying client.
    pub(crate) fn ready(result: Result<T>) -> Self {
        Self {
            state: State::Ready(Some(result)),
        }
    }

    /// Spawns `future` onto the runtime and tracks its completion.
    ///
    /// Must be called within a tokio runtime context.
    pub(crate) fn dispatch<F>(future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            state: State::Running(tokio::spawn(future)),
        }
    }

    /// Delivers the outcome to `handler` once the call settles.
    ///
    /// The handler is invoked exactly once, with the operation's result
    /// or its error. The returned join handle completes after the handler
    /// has run, which is mainly useful in tests.
    pub fn on_complete<F>(self, handler: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<T>) + Send + 'static,
    {
        tokio::spawn(async move { handler(self.await) })
    }
}

impl<T: Send + 'static> Future for Call<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Ready(slot) => {
                Poll::Ready(slot.take().expect("Call polled after completion"))
            }
            State::Running(handle) => match Pin::new(handle).poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                // The spawned operation panicked or was aborted; surface it
                // through the same single channel as any other failure.
                Poll::Ready(Err(join_error)) => {
                    Poll::Ready(Err(Error::Underlying(Box::new(join_error))))
                }
            },
        }
    }
}
