//! Clamp engine.
//!
//! ```text
//! ClampRequest ──► estimate_ellipsis_width ──┐
//!              └─► binary search ◄── HeightOracle (measure by rendering)
//!                        │
//!                        ▼
//!                   ClampEngine ──► Signal<ClampResult> (versioned)
//! ```
//!
//! - [`ellipsis`] - How many trailing characters the marker costs
//! - [`search`] - Pure search over an injected oracle
//! - [`engine`] - Versioned, reactive result state

pub mod ellipsis;
pub mod engine;
pub mod search;

pub use ellipsis::{DEFAULT_ELLIPSIS_RESERVE, estimate_ellipsis_width};
pub use engine::ClampEngine;
pub use search::{ClampOutcome, Clamped, SkipReason, clamp};
