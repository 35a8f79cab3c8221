//! Deterministic oracle for unit tests.

use crate::measure::{HeightOracle, grapheme_len};

/// A node whose height grows linearly with the number of graphemes shown.
pub struct LinearNode {
    content: String,
    scale: Scale,
    line_height: Option<f64>,
    measurements: usize,
}

enum Scale {
    PxPerChar(f64),
    CharsPerPx(f64),
}

impl LinearNode {
    /// `height = graphemes * px`
    pub fn per_char(px: f64) -> Self {
        Self::with_scale(Scale::PxPerChar(px))
    }

    /// `height = graphemes / chars`
    pub fn chars_per_px(chars: f64) -> Self {
        Self::with_scale(Scale::CharsPerPx(chars))
    }

    fn with_scale(scale: Scale) -> Self {
        Self {
            content: ".".to_string(),
            scale,
            line_height: Some(20.0),
            measurements: 0,
        }
    }

    pub fn with_line_height(mut self, line_height: Option<f64>) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn measurements(&self) -> usize {
        self.measurements
    }
}

impl HeightOracle for LinearNode {
    fn set_content(&mut self, text: &str) {
        self.content = text.to_string();
    }

    fn client_height(&self) -> f64 {
        let len = grapheme_len(&self.content) as f64;
        match self.scale {
            Scale::PxPerChar(px) => len * px,
            Scale::CharsPerPx(chars) => len / chars,
        }
    }

    fn line_height(&self) -> Option<f64> {
        self.line_height
    }

    fn measure(&mut self, candidate: &str) -> f64 {
        self.measurements += 1;
        self.set_content(candidate);
        self.client_height()
    }
}
