//! Core types for line clamping.
//!
//! - [`Ellipsis`] - What gets appended to a clamped text
//! - [`ClampOptions`] - User-facing configuration (with defaults)
//! - [`ClampRequest`] - Borrowed input to one clamp computation
//! - [`ClampResult`] - What the host renders, stamped with a [`Version`]

use std::fmt;

use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::error::ClampError;

// =============================================================================
// Constants
// =============================================================================

/// The default ellipsis marker.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Default number of visible lines.
pub const DEFAULT_LINES: u32 = 3;

/// Default resize debounce in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default character-width heuristic used to size the ellipsis reserve.
pub const DEFAULT_CHAR_WIDTH: f64 = 1.2;

/// Extra pixel of slack allowed on top of `line_height * lines`.
pub const HEIGHT_TOLERANCE_PX: f64 = 1.0;

// =============================================================================
// Ellipsis
// =============================================================================

/// Ellipsis setting.
///
/// A `Marker` is appended verbatim to a clamped text. `Units` only reserves
/// room (in abstract width units) and appends nothing, which is useful when the
/// host draws its own "more" affordance after the text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEllipsis")]
pub enum Ellipsis {
    /// Literal marker string.
    Marker(String),
    /// Reserve `n` width units without appending a visible marker.
    Units(f64),
    /// No reserve and no marker.
    Disabled,
}

impl Ellipsis {
    /// The text appended after the cut point.
    pub fn marker(&self) -> &str {
        match self {
            Ellipsis::Marker(s) => s,
            Ellipsis::Units(_) | Ellipsis::Disabled => "",
        }
    }

    /// Whether this is the default three-dot marker.
    pub fn is_default_marker(&self) -> bool {
        matches!(self, Ellipsis::Marker(s) if s == DEFAULT_ELLIPSIS)
    }
}

impl Default for Ellipsis {
    fn default() -> Self {
        Ellipsis::Marker(DEFAULT_ELLIPSIS.to_string())
    }
}

impl From<&str> for Ellipsis {
    fn from(s: &str) -> Self {
        Ellipsis::Marker(s.to_string())
    }
}

impl From<String> for Ellipsis {
    fn from(s: String) -> Self {
        Ellipsis::Marker(s)
    }
}

impl From<f64> for Ellipsis {
    fn from(n: f64) -> Self {
        Ellipsis::Units(n)
    }
}

impl From<u32> for Ellipsis {
    fn from(n: u32) -> Self {
        Ellipsis::Units(f64::from(n))
    }
}

/// Wire shape of a configured ellipsis: string, number, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEllipsis {
    Marker(String),
    Units(f64),
    Other(IgnoredAny),
}

impl From<RawEllipsis> for Ellipsis {
    fn from(raw: RawEllipsis) -> Self {
        match raw {
            RawEllipsis::Marker(s) => Ellipsis::Marker(s),
            RawEllipsis::Units(n) => Ellipsis::Units(n),
            RawEllipsis::Other(_) => Ellipsis::Disabled,
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Configuration for a clamped text.
///
/// Follows the props pattern: fill what you need, default the rest.
///
/// ```
/// use spark_clamp::ClampOptions;
///
/// let options = ClampOptions {
///     text: "A long paragraph".to_string(),
///     lines: 2,
///     ..Default::default()
/// };
/// assert_eq!(options.debounce_time, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClampOptions {
    /// Full text to clamp.
    pub text: String,
    /// Ellipsis setting.
    pub ellipsis: Ellipsis,
    /// Maximum number of visible lines.
    pub lines: u32,
    /// When expanded, the full text is shown and nothing is measured.
    pub expanded: bool,
    /// Resize debounce in milliseconds.
    pub debounce_time: u64,
    /// Character-width heuristic for the ellipsis reserve.
    pub char_width: f64,
}

impl Default for ClampOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            ellipsis: Ellipsis::default(),
            lines: DEFAULT_LINES,
            expanded: false,
            debounce_time: DEFAULT_DEBOUNCE_MS,
            char_width: DEFAULT_CHAR_WIDTH,
        }
    }
}

impl ClampOptions {
    /// Options for `text` with every other field defaulted.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Reject line budgets of zero and unusable character widths.
    pub fn validate(&self) -> Result<(), ClampError> {
        if self.lines == 0 {
            return Err(ClampError::InvalidLineBudget(self.lines));
        }
        if !self.char_width.is_finite() || self.char_width <= 0.0 {
            return Err(ClampError::InvalidCharWidth(self.char_width));
        }
        Ok(())
    }

    /// Build a request against the given per-line height.
    pub fn request(&self, line_height: f64) -> ClampRequest<'_> {
        ClampRequest {
            text: &self.text,
            line_height,
            lines: self.lines,
            expanded: self.expanded,
            ellipsis: &self.ellipsis,
            char_width: self.char_width,
        }
    }
}

// =============================================================================
// Request / Result
// =============================================================================

/// Input to a single clamp computation.
#[derive(Debug, Clone, Copy)]
pub struct ClampRequest<'a> {
    pub text: &'a str,
    /// Height of one rendered line, in pixels.
    pub line_height: f64,
    pub lines: u32,
    pub expanded: bool,
    pub ellipsis: &'a Ellipsis,
    pub char_width: f64,
}

impl ClampRequest<'_> {
    /// Tallest rendered height that still counts as fitting.
    pub fn max_height(&self) -> f64 {
        self.line_height * f64::from(self.lines) + HEIGHT_TOLERANCE_PX
    }
}

/// Opaque token that changes on every computation.
///
/// Hosts that compare results by identity use it to notice that a new
/// computation happened even when the text did not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version(u64);

impl Version {
    /// Version carried by the placeholder result, before any computation.
    pub const INITIAL: Version = Version(0);

    /// The version after this one.
    pub fn next(self) -> Version {
        Version(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clamp-{}", self.0)
    }
}

/// What the host should render.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampResult {
    pub is_truncated: bool,
    pub display_text: String,
    pub version: Version,
}

impl ClampResult {
    /// Placeholder shown before the first computation.
    ///
    /// A single dot keeps the host node laid out with a non-zero height.
    pub fn placeholder() -> Self {
        Self {
            is_truncated: false,
            display_text: ".".to_string(),
            version: Version::INITIAL,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
