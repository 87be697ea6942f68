//! Display sinks: where rendered output and alerts end up.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::trace;

/// The single region that all rendered output goes to.
///
/// Every call to [`DisplaySink::show`] replaces whatever was shown before.
/// Alerts are separate; they correspond to validation failures
/// and never touch the displayed text.
pub trait DisplaySink: Send + Sync + 'static {
    /// Replaces the displayed text.
    fn show(&self, text: &str);

    /// Surfaces a validation failure to the user.
    fn alert(&self, message: &str);
}

impl<S: DisplaySink + ?Sized> DisplaySink for Arc<S> {
    fn show(&self, text: &str) {
        (**self).show(text);
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

/// A sink that simply remembers what it was given.
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    text: Option<String>,
    alerts: Vec<String>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    /// The currently displayed text, if anything was rendered yet.
    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    /// Every alert raised so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // The state is always left consistent, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DisplaySink for MemorySink {
    fn show(&self, text: &str) {
        self.lock().text = Some(text.to_string());
    }

    fn alert(&self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }
}

/// Something that happened to a [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// New display text (replacing the previous one).
    Output(String),
    /// A validation alert.
    Alert(String),
}

/// A sink that forwards everything over a channel,
/// in the order renders happen.
///
/// Useful when rendering happens somewhere else (ex: a terminal render loop).
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<SinkEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiving end of its event stream.
    pub fn new() -> (ChannelSink, UnboundedReceiver<SinkEvent>) {
        let (tx, rx) = unbounded_channel();
        (ChannelSink { tx }, rx)
    }

    fn send(&self, event: SinkEvent) {
        if self.tx.send(event).is_err() {
            trace!("Sink receiver dropped; discarding event");
        }
    }
}

impl DisplaySink for ChannelSink {
    fn show(&self, text: &str) {
        self.send(SinkEvent::Output(text.to_string()));
    }

    fn alert(&self, message: &str) {
        self.send(SinkEvent::Alert(message.to_string()));
    }
}
