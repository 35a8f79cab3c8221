//! Grapheme-aware widths and cut points.
//!
//! Cut indices in this crate count extended grapheme clusters, so a clamp
//! never splits a flag, a ZWJ sequence, or a base character from its marks.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Display width of a codepoint in terminal cells.
///
/// `0` for controls and combining marks, `2` for wide (CJK, fullwidth) and
/// the emoji blocks below, `1` otherwise.
#[inline]
pub fn char_width(c: char) -> usize {
    match c as u32 {
        // Dingbats and misc symbols (sparkles, zap)
        0x2600..=0x27BF => 2,
        // Pictographs and emoticons
        0x1F300..=0x1F64F => 2,
        // Transport and map symbols
        0x1F680..=0x1F6FF => 2,
        // Supplemental pictographs
        0x1F900..=0x1F9FF => 2,
        // Pictographs extended-A
        0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Display width of one grapheme cluster in terminal cells.
///
/// A single codepoint uses [`char_width`]. Flags and emoji sequences are 2
/// cells; a base character with combining marks takes the base width.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    // Regional indicator pair
    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }

    let emoji_sequence = chars.any(|c| {
        matches!(
            c as u32,
            0x200D              // zero-width joiner
            | 0xFE0F            // VS16, emoji presentation
            | 0x1F3FB..=0x1F3FF // skin tone modifier
            | 0x20E3            // enclosing keycap
        )
    });
    if emoji_sequence {
        return 2;
    }

    // Base plus combining marks
    first.width().unwrap_or(0)
}

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    // ASCII: count printable bytes
    if s.is_ascii() {
        return s.bytes().filter(|&b| (0x20..0x7F).contains(&b)).count();
    }
    s.graphemes(true).map(grapheme_width).sum()
}

/// Number of grapheme clusters in `s`.
pub fn grapheme_len(s: &str) -> usize {
    if s.is_ascii() {
        return s.len();
    }
    s.graphemes(true).count()
}

/// Byte offsets of every grapheme boundary in a text.
///
/// Built once per clamp so each probe can slice a prefix in O(1).
#[derive(Debug, Clone)]
pub struct GraphemeCuts<'a> {
    text: &'a str,
    /// `bounds[i]` is the byte offset where grapheme `i` starts;
    /// the last entry is `text.len()`.
    bounds: Vec<usize>,
}

impl<'a> GraphemeCuts<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut bounds: Vec<usize> = if text.is_ascii() {
            (0..text.len()).collect()
        } else {
            text.grapheme_indices(true).map(|(i, _)| i).collect()
        };
        bounds.push(text.len());
        Self { text, bounds }
    }

    /// Number of graphemes.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first `n` graphemes (saturating at the full text).
    pub fn prefix(&self, n: usize) -> &'a str {
        let end = self.bounds[n.min(self.len())];
        &self.text[..end]
    }
}
