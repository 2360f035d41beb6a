//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background reader
//! that forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a blocking reader that polls the terminal and sends events through
/// the returned channel.  The reader stops once the receiver is dropped.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            // Poll with a timeout so a closed receiver is noticed promptly.
            if !event::poll(poll_interval).unwrap_or(false) {
                continue;
            }
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(err) => {
                    tracing::warn!("terminal read failed: {err}");
                    break;
                }
            };
            let app_event = match ev {
                CtEvent::Key(k) => AppEvent::Key(k),
                CtEvent::Mouse(m) => AppEvent::Mouse(m),
                CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
