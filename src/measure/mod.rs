//! Height measurement.
//!
//! The clamp search never lays text out itself. It asks a [`HeightOracle`]:
//! "render this candidate in your node, how tall is it now?". A browser host
//! would back this with a live element; [`CellTextBox`] backs it with a
//! terminal cell box.
//!
//! # Contract
//!
//! Measuring mutates the node. After a search the node shows whatever was
//! probed last, so the caller must write the chosen text back (the clamp
//! search does this before returning).

mod cell_box;
mod width;

pub use cell_box::{CellTextBox, DEFAULT_ROW_HEIGHT, WrapMode};
pub use width::{GraphemeCuts, char_width, grapheme_len, grapheme_width, string_width};

use crate::error::ClampError;

// =============================================================================
// HeightOracle
// =============================================================================

/// A live, styled node that can render candidate text and report its height.
pub trait HeightOracle {
    /// Replace the rendered content.
    fn set_content(&mut self, text: &str);

    /// Rendered height of the current content, in pixels.
    ///
    /// Zero means the node is not laid out (hidden, detached, or empty).
    fn client_height(&self) -> f64;

    /// Computed height of one line, in pixels. `None` if unknown.
    fn line_height(&self) -> Option<f64>;

    /// Render `candidate` and return its height.
    fn measure(&mut self, candidate: &str) -> f64 {
        self.set_content(candidate);
        self.client_height()
    }

    /// The host surface changed size.
    ///
    /// Nodes that lay themselves out against the host size should update here;
    /// the resize-triggered clamp runs afterwards.
    fn host_resized(&mut self, _cols: u16, _rows: u16) {}
}

// =============================================================================
// Line height
// =============================================================================

/// Parse a computed line height such as `"20px"`, `"18.5"` or `" 24px "`.
///
/// Keywords like `normal` have no pixel value and are rejected.
pub fn parse_line_height(value: &str) -> Result<f64, ClampError> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    match number.parse::<f64>() {
        Ok(px) if px.is_finite() && px >= 0.0 => Ok(px),
        _ => Err(ClampError::InvalidLineHeight(value.to_string())),
    }
}

/// Line height a node reports, treating zero and garbage as unknown.
pub fn usable_line_height<N: HeightOracle + ?Sized>(node: &N) -> Option<f64> {
    node.line_height().filter(|px| px.is_finite() && *px > 0.0)
}
