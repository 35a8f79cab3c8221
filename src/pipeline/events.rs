//! Clamp events - everything that can ask for a recomputation.
//!
//! ```text
//! ResizeWatcher thread ──┐
//! host code (sender())  ─┼──► channel ──► ClampDriver::pump / run
//! ```
//!
//! Producers never touch the driver's state; they only send messages. The
//! driver drains them on its own thread, so the measurement node is only ever
//! used by one computation at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent};
use tracing::warn;

use crate::error::ClampError;
use crate::types::Ellipsis;

// =============================================================================
// CLAMP EVENT
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ClampEvent {
    /// Host surface resized (debounced).
    Resized { cols: u16, rows: u16 },
    /// New full text.
    Text(String),
    /// Expand or collapse.
    Expanded(bool),
    /// New character-width heuristic.
    CharWidth(f64),
    /// New line budget, used from the next computation on.
    Lines(u32),
    /// New ellipsis, used from the next computation on.
    Ellipsis(Ellipsis),
    /// Leave the event loop.
    Stop,
}

impl ClampEvent {
    /// The clamp-relevant part of a terminal event.
    pub fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Resize(cols, rows) => Some(ClampEvent::Resized { cols, rows }),
            _ => None,
        }
    }
}

// =============================================================================
// EVENT CHANNEL
// =============================================================================

/// Multi-producer channel feeding one driver.
pub struct EventChannel {
    tx: Sender<ClampEvent>,
    rx: Receiver<ClampEvent>,
}

impl EventChannel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A sender for another producer.
    pub fn sender(&self) -> Sender<ClampEvent> {
        self.tx.clone()
    }

    /// Block until an event arrives.
    pub fn recv(&self) -> Option<ClampEvent> {
        self.rx.recv().ok()
    }

    /// Next queued event, without blocking.
    pub fn try_recv(&self) -> Option<ClampEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block for at most `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClampEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// RESIZE WATCHER
// =============================================================================

/// Thread forwarding terminal resizes as [`ClampEvent::Resized`].
///
/// `crossterm::event::poll` sleeps in the kernel until input arrives; the
/// timeout only bounds how long `stop` waits for the thread to notice.
pub struct ResizeWatcher {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl ResizeWatcher {
    pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(100);

    pub fn spawn(tx: Sender<ClampEvent>) -> Result<Self, ClampError> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let handle = thread::Builder::new()
            .name("clamp-resize".to_string())
            .spawn(move || Self::run_loop(&flag, &tx))?;

        Ok(Self {
            handle: Some(handle),
            running,
        })
    }

    fn run_loop(running: &AtomicBool, tx: &Sender<ClampEvent>) {
        while running.load(Ordering::SeqCst) {
            match event::poll(Self::SHUTDOWN_TIMEOUT) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        let Some(clamp_event) = ClampEvent::from_crossterm(ev) else {
                            continue;
                        };
                        if tx.send(clamp_event).is_err() {
                            // Driver gone
                            break;
                        }
                    }
                    Err(err) => warn!(error = %err, "terminal read failed"),
                },
                Ok(false) => {}
                Err(err) => {
                    warn!(error = %err, "terminal poll failed, stopping resize watcher");
                    break;
                }
            }
        }
    }

    /// Stop the thread and wait for it.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && self.handle.is_some()
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// TESTS
// =============================================================================
