//! Interactive mode: one action per line, fired without waiting for the previous one.

use std::io::Write;

use crate::commands::parse_line;
use busnet_dispatch::{ChannelSink, DisplaySink, Dispatcher, Outcome, SinkEvent, Transport};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Reads action lines from `input` until EOF (or `quit`), rendering into `out`.
///
/// Requests are not serialized: a slow response can land after a later one
/// and overwrite it, exactly like triggering the actions by hand.
/// Alerts and unparseable lines are written as `! <message>`.
///
/// # Errors
///
/// Fails if `input` can't be read, `out` can't be written, or a dispatch task panics.
pub async fn run<T, R, W>(transport: T, input: R, mut out: W) -> anyhow::Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let (sink, mut events) = ChannelSink::new();
    let dispatcher = Dispatcher::new(transport, sink.clone());

    let render = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SinkEvent::Output(text) => writeln!(out, "{text}")?,
                SinkEvent::Alert(message) => writeln!(out, "! {message}")?,
            }
            out.flush()?;
        }
        Ok::<(), std::io::Error>(())
    });

    info!("Shell ready; type an action (ex: `suggest Cen`), `help`, or `quit`");

    let mut lines = input.lines();
    let mut in_flight: Vec<JoinHandle<Outcome>> = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        match parse_line(line) {
            Ok(action) => {
                debug!(action = action.name(), "Triggering");
                in_flight.retain(|handle| !handle.is_finished());
                in_flight.push(dispatcher.trigger(action));
            }
            Err(e) => sink.alert(e.to_string().trim_end()),
        }
    }

    // Let whatever is still in flight land before the render loop shuts down.
    for handle in in_flight {
        handle.await?;
    }
    drop(dispatcher);
    drop(sink);
    render.await??;

    Ok(())
}
