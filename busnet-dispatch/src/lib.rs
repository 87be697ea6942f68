//! The busnet request dispatcher.
//!
//! A [`Dispatcher`] turns user [`Action`]s into backend requests
//! and renders whatever comes back into a [`DisplaySink`].
//!
//! # Ordering
//!
//! Each dispatch is independent: there are no retries, no timeouts and no cancellation.
//! Overlapping dispatches race, and whichever response resolves *last* overwrites the sink,
//! regardless of the order in which the requests were sent.

use busnet_contract::OutputEnvelope;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

mod action;
mod error;
mod request;
pub mod sink;
pub mod transport;

pub use action::Action;
pub use error::{DispatchError, TransportError, ValidationError};
pub use request::ApiRequest;
pub use sink::{ChannelSink, DisplaySink, MemorySink, SinkEvent};
pub use transport::{HttpTransport, Transport};

/// What a single dispatch ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response was rendered into the sink.
    Rendered(String),
    /// The request failed; the `Error: ...` text was rendered into the sink.
    Failed(String),
    /// A required field was empty. An alert was raised and nothing was sent.
    Rejected(ValidationError),
}

impl Outcome {
    /// The text that reached the user (display text or alert).
    pub fn text(&self) -> &str {
        match self {
            Outcome::Rendered(text) | Outcome::Failed(text) => text,
            Outcome::Rejected(e) => e.message(),
        }
    }
}

/// Maps actions to backend requests and renders the results.
///
/// Cloning is cheap; clones share the same transport and sink.
pub struct Dispatcher<T, S> {
    inner: Arc<Inner<T, S>>,
}

struct Inner<T, S> {
    transport: T,
    sink: S,
}

impl<T, S> Clone for Dispatcher<T, S> {
    fn clone(&self) -> Self {
        Dispatcher {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport, S: DisplaySink> Dispatcher<T, S> {
    pub fn new(transport: T, sink: S) -> Dispatcher<T, S> {
        Dispatcher {
            inner: Arc::new(Inner { transport, sink }),
        }
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    pub fn sink(&self) -> &S {
        &self.inner.sink
    }

    /// Validates `action`, sends it, and renders the result into the sink.
    ///
    /// Validation failures raise an alert and never reach the transport.
    /// Every other failure is rendered as `Error: <description>`.
    pub async fn dispatch(&self, action: Action) -> Outcome {
        let request = match action.to_request() {
            Ok(request) => request,
            Err(e) => {
                debug!(action = action.name(), "Rejected: {e}");
                self.inner.sink.alert(e.message());
                return Outcome::Rejected(e);
            }
        };

        debug!(
            action = action.name(),
            method = %request.method,
            path = request.path,
            "Sending request"
        );

        match self.fetch(request).await {
            Ok(envelope) => {
                if let Some(message) = envelope.error_message() {
                    debug!(action = action.name(), "Backend reported an error: {message}");
                }
                let text = envelope.render();
                self.inner.sink.show(&text);
                Outcome::Rendered(text)
            }
            Err(e) => {
                warn!(action = action.name(), "Request failed: {e}");
                let text = format!("Error: {e}");
                self.inner.sink.show(&text);
                Outcome::Failed(text)
            }
        }
    }

    /// Fires off `action` on the Tokio runtime without waiting for it.
    ///
    /// The returned handle may be awaited or dropped;
    /// dropping it does not cancel the request.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn trigger(&self, action: Action) -> JoinHandle<Outcome> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.dispatch(action).await })
    }

    async fn fetch(&self, request: ApiRequest) -> Result<OutputEnvelope, DispatchError> {
        let body = self.inner.transport.send(request).await?;
        Ok(OutputEnvelope::from_slice(&body)?)
    }
}
