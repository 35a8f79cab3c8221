//! Terminal cell box - a [`HeightOracle`] backed by a fixed-width text box.
//!
//! Rows are counted the way a terminal lays out wrapped text: explicit
//! newlines start a row, and a row breaks when the next grapheme (or word, in
//! [`WrapMode::Word`]) would overflow the box width. The box only counts rows;
//! it never hands reflowed text back.

use unicode_segmentation::UnicodeSegmentation;

use super::HeightOracle;
use super::width::{grapheme_width, string_width};
use crate::error::ClampError;

/// How the box breaks rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Break at any grapheme boundary.
    Grapheme,
    /// Break at word boundaries; overlong words fall back to grapheme breaks.
    #[default]
    Word,
}

/// Nominal pixel height of one terminal row.
///
/// Must stay well above the one-pixel fit tolerance, or a clamp would let an
/// extra row through.
pub const DEFAULT_ROW_HEIGHT: f64 = 16.0;

/// A text box `width` cells wide whose rows are `row_height` pixels tall.
#[derive(Debug, Clone)]
pub struct CellTextBox {
    width: u16,
    row_height: f64,
    wrap: WrapMode,
    follow_host: bool,
    content: String,
    rows: usize,
}

impl CellTextBox {
    pub fn new(width: u16) -> Self {
        Self {
            width,
            row_height: DEFAULT_ROW_HEIGHT,
            wrap: WrapMode::default(),
            follow_host: false,
            content: String::new(),
            rows: 0,
        }
    }

    /// A box spanning the current terminal width that tracks host resizes.
    pub fn from_terminal() -> Result<Self, ClampError> {
        let (cols, _) = crossterm::terminal::size()?;
        Ok(Self::new(cols).following_host())
    }

    /// Adopt the host's column count on every resize.
    pub fn following_host(mut self) -> Self {
        self.follow_host = true;
        self
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self.relayout();
        self
    }

    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn set_row_height(&mut self, row_height: f64) {
        self.row_height = row_height;
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
        self.relayout();
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Text currently rendered in the box.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Rows the current content occupies.
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn relayout(&mut self) {
        self.rows = count_rows(&self.content, usize::from(self.width), self.wrap);
    }
}

impl HeightOracle for CellTextBox {
    fn set_content(&mut self, text: &str) {
        self.content.clear();
        self.content.push_str(text);
        self.relayout();
    }

    fn client_height(&self) -> f64 {
        self.rows as f64 * self.row_height
    }

    fn line_height(&self) -> Option<f64> {
        (self.width > 0).then_some(self.row_height)
    }

    fn host_resized(&mut self, cols: u16, _rows: u16) {
        if self.follow_host {
            self.set_width(cols);
        }
    }
}

// =============================================================================
// Row counting
// =============================================================================

/// Rows `text` occupies in a box `width` cells wide.
///
/// Empty text and a zero-width box both take no rows.
pub fn count_rows(text: &str, width: usize, wrap: WrapMode) -> usize {
    if text.is_empty() || width == 0 {
        return 0;
    }

    text.split('\n')
        .map(|line| match wrap {
            WrapMode::Grapheme => grapheme_rows(line, width),
            WrapMode::Word => word_rows(line, width),
        })
        .sum()
}

fn grapheme_rows(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut current = 0;
    push_graphemes(line, width, &mut rows, &mut current);
    rows
}

fn word_rows(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut current = 0;

    for word in line.split_word_bounds() {
        let w = string_width(word);
        if current + w <= width {
            current += w;
            continue;
        }

        // Overflowing whitespace hangs off the row end
        if word.chars().all(char::is_whitespace) {
            current = width;
            continue;
        }

        if current > 0 {
            rows += 1;
            current = 0;
        }

        if w <= width {
            current = w;
        } else {
            push_graphemes(word, width, &mut rows, &mut current);
        }
    }

    rows
}

fn push_graphemes(s: &str, width: usize, rows: &mut usize, current: &mut usize) {
    for grapheme in s.graphemes(true) {
        let gw = grapheme_width(grapheme);
        if *current + gw > width && *current > 0 {
            *rows += 1;
            *current = 0;
        }
        *current += gw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_rows_empty() {
        assert_eq!(count_rows("", 10, WrapMode::Word), 0);
        assert_eq!(count_rows("hello", 0, WrapMode::Word), 0);
    }

    #[test]
    fn count_rows_grapheme_break() {
        assert_eq!(count_rows("hello", 10, WrapMode::Grapheme), 1);
        assert_eq!(count_rows("hello world", 5, WrapMode::Grapheme), 3);
    }

    #[test]
    fn count_rows_newlines() {
        assert_eq!(count_rows("a\nb\nc", 10, WrapMode::Grapheme), 3);
        assert_eq!(count_rows("a\n", 10, WrapMode::Word), 2);
    }

    #[test]
    fn count_rows_word_break() {
        // "hello " fits, "world" moves down
        assert_eq!(count_rows("hello world", 8, WrapMode::Word), 2);
        // the space hangs at the end of the first row
        assert_eq!(count_rows("hello world", 5, WrapMode::Word), 2);
        assert_eq!(count_rows("hi there you", 20, WrapMode::Word), 1);
    }

    #[test]
    fn count_rows_overlong_word() {
        assert_eq!(count_rows("abcdefghij", 4, WrapMode::Word), 3);
        assert_eq!(count_rows("ab abcdefghij", 4, WrapMode::Word), 4);
    }

    #[test]
    fn count_rows_wide_chars() {
        assert_eq!(count_rows("你好世界", 4, WrapMode::Grapheme), 2);
        assert_eq!(count_rows("你好世界", 5, WrapMode::Grapheme), 2);
    }

    #[test]
    fn box_height_scales_with_row_height() {
        let mut node = CellTextBox::new(5).with_row_height(16.0);
        node.set_content("hello world");
        assert_eq!(node.rows(), 2);
        assert_eq!(node.client_height(), 32.0);
        assert_eq!(node.line_height(), Some(16.0));
    }

    #[test]
    fn box_relayouts_on_resize() {
        let mut node = CellTextBox::new(5).following_host();
        node.set_content("hello world");
        assert_eq!(node.rows(), 2);
        node.host_resized(20, 10);
        assert_eq!(node.width(), 20);
        assert_eq!(node.rows(), 1);
    }

    #[test]
    fn box_ignores_resize_unless_following() {
        let mut node = CellTextBox::new(5);
        node.host_resized(20, 10);
        assert_eq!(node.width(), 5);
    }

    #[test]
    fn zero_width_box_is_not_laid_out() {
        let mut node = CellTextBox::new(0);
        node.set_content("hello");
        assert_eq!(node.client_height(), 0.0);
        assert_eq!(node.line_height(), None);
    }
}
