//! Recomputation Pipeline
//!
//! Connects host events to the clamp engine.
//!
//! ```text
//! resize ─► ClampEvent ─► channel ─► Debouncer ─┐
//! text / expanded / char width ─► ClampEvent ───┼─► ClampDriver ─► ClampEngine
//! attach (mount) ───────────────────────────────┘
//! ```
//!
//! - [`events`] - Event type, channel, terminal resize watcher
//! - [`debounce`] - Trailing-edge timer for resize bursts
//! - [`driver`] - Owns the node and sequences computations

pub mod debounce;
pub mod driver;
pub mod events;

pub use debounce::Debouncer;
pub use driver::{ClampDriver, Triggers};
pub use events::{ClampEvent, EventChannel, ResizeWatcher};
