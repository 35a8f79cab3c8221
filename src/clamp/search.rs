//! Binary search for the longest prefix that fits.
//!
//! Each probe renders a candidate prefix into the node and reads its height
//! back, so the search costs O(log n) layouts. The node is left showing the
//! chosen text when a truncation is computed.

use tracing::trace;

use super::ellipsis::estimate_ellipsis_width;
use crate::measure::{GraphemeCuts, HeightOracle};
use crate::types::ClampRequest;

/// Why a computation did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No node attached yet (or it was detached).
    Detached,
    /// The node reports zero height: hidden or not laid out.
    NotLaidOut,
}

/// Output of a completed computation, before it is versioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clamped {
    pub is_truncated: bool,
    pub display_text: String,
    /// Number of oracle measurements taken.
    pub probes: usize,
}

impl Clamped {
    fn full(text: &str, probes: usize) -> Self {
        Self {
            is_truncated: false,
            display_text: text.to_string(),
            probes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClampOutcome {
    Computed(Clamped),
    Skipped(SkipReason),
}

/// Find the longest prefix of `request.text` that renders within
/// `request.max_height()` and append the ellipsis to it.
///
/// Empty text and expanded requests short-circuit to the full text without
/// touching the node. Heights equal to the limit count as fitting.
pub fn clamp<N>(request: &ClampRequest<'_>, node: Option<&mut N>) -> ClampOutcome
where
    N: HeightOracle + ?Sized,
{
    let Some(node) = node else {
        return ClampOutcome::Skipped(SkipReason::Detached);
    };

    if request.text.is_empty() || request.expanded {
        return ClampOutcome::Computed(Clamped::full(request.text, 0));
    }

    let current = node.client_height();
    if current.is_nan() || current <= 0.0 {
        return ClampOutcome::Skipped(SkipReason::NotLaidOut);
    }

    let max_height = request.max_height();
    let reserve = estimate_ellipsis_width(request.ellipsis, request.char_width);
    let cuts = GraphemeCuts::new(request.text);
    let len = cuts.len();

    let mut start = 0;
    let mut end = len;
    let mut fitting = 0;
    let mut probes = 0;

    while start <= end {
        let middle = (start + end) / 2;
        let height = node.measure(cuts.prefix(middle));
        probes += 1;
        trace!(middle, height, max_height, "clamp probe");

        if middle == len {
            return ClampOutcome::Computed(Clamped::full(request.text, probes));
        }

        if height <= max_height {
            fitting = middle;
            start = middle + 1;
        } else if let Some(shorter) = middle.checked_sub(1) {
            end = shorter;
        } else {
            break;
        }
    }

    let mut display_text = cuts
        .prefix(fitting.saturating_sub(reserve))
        .trim()
        .to_string();
    display_text.push_str(request.ellipsis.marker());
    node.set_content(&display_text);

    ClampOutcome::Computed(Clamped {
        is_truncated: true,
        display_text,
        probes,
    })
}
