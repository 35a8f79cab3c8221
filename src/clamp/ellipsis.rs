//! Ellipsis reserve estimation.

use crate::measure::grapheme_len;
use crate::types::Ellipsis;

/// Fixed reserve for the default `"..."` marker.
///
/// Calibrated for three dots at typical font sizes; it does not scale with
/// `char_width`. Changing it moves every default truncation point.
pub const DEFAULT_ELLIPSIS_RESERVE: usize = 5;

/// Number of trailing characters to give up for the ellipsis.
pub fn estimate_ellipsis_width(ellipsis: &Ellipsis, char_width: f64) -> usize {
    match ellipsis {
        e if e.is_default_marker() => DEFAULT_ELLIPSIS_RESERVE,
        Ellipsis::Marker(s) => scaled(grapheme_len(s) as f64, char_width),
        Ellipsis::Units(n) => scaled(*n, char_width),
        Ellipsis::Disabled => 0,
    }
}

// Float-to-int `as` saturates: negatives and NaN land on 0.
fn scaled(units: f64, char_width: f64) -> usize {
    (units * char_width).ceil() as usize
}
