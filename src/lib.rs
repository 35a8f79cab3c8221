//! # spark-clamp
//!
//! Line clamping for reactive terminal text.
//!
//! Given a text, a line budget and an ellipsis, find the longest prefix whose
//! rendered height fits, and keep that answer fresh as the text, the expansion
//! state or the host size change.
//!
//! ## Architecture
//!
//! The cut point is found by binary search against a [`HeightOracle`]: a live
//! node that renders each candidate and reports its height. The crate never
//! lays text out on its own behalf; [`CellTextBox`] is the terminal oracle it
//! ships with, and hosts with a real layout engine implement the trait.
//!
//! ```text
//! ClampDriver (lifecycle, events, debounce)
//!     └─► ClampEngine (versioned Signal<ClampResult>)
//!             └─► clamp() ──► HeightOracle
//! ```
//!
//! ## Example
//!
//! ```
//! use spark_clamp::{CellTextBox, ClampDriver, ClampOptions};
//!
//! let mut driver = ClampDriver::new(ClampOptions {
//!     text: "The quick brown fox jumps over the lazy dog. ".repeat(4),
//!     lines: 2,
//!     ..Default::default()
//! })?;
//!
//! let result = driver.attach(CellTextBox::new(30)).expect("mounted with text");
//! assert!(result.is_truncated);
//! assert!(result.display_text.ends_with("..."));
//! # Ok::<(), spark_clamp::ClampError>(())
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Options, requests, results, ellipsis
//! - [`clamp`] - Ellipsis reserve, binary search, result engine
//! - [`measure`] - Height oracle trait, widths, terminal cell box
//! - [`pipeline`] - Events, debounce, lifecycle driver

pub mod clamp;
pub mod error;
pub mod measure;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod testing;

pub use types::*;

pub use error::ClampError;

pub use clamp::{
    ClampEngine, ClampOutcome, Clamped, DEFAULT_ELLIPSIS_RESERVE, SkipReason, clamp,
    estimate_ellipsis_width,
};

pub use measure::{
    CellTextBox, GraphemeCuts, HeightOracle, WrapMode, grapheme_len, parse_line_height,
    string_width, usable_line_height,
};

pub use pipeline::{ClampDriver, ClampEvent, Debouncer, EventChannel, ResizeWatcher, Triggers};
