//! End-to-end clamp behaviour against a scripted height oracle.
//!
//! The oracle renders `n` graphemes at `n / 10` px. With a 20px line height
//! and a two-line budget the limit is 41px, so prefixes up to 410 fit.

use spark_clamp::{
    CellTextBox, ClampEngine, ClampOptions, ClampOutcome, Ellipsis, HeightOracle, SkipReason,
    Version, WrapMode, clamp, grapheme_len,
};

struct TenPerPx {
    content: String,
    calls: usize,
}

impl TenPerPx {
    fn new() -> Self {
        Self {
            content: ".".to_string(),
            calls: 0,
        }
    }
}

impl HeightOracle for TenPerPx {
    fn set_content(&mut self, text: &str) {
        self.content = text.to_string();
    }

    fn client_height(&self) -> f64 {
        grapheme_len(&self.content) as f64 / 10.0
    }

    fn line_height(&self) -> Option<f64> {
        Some(20.0)
    }

    fn measure(&mut self, candidate: &str) -> f64 {
        self.calls += 1;
        self.set_content(candidate);
        self.client_height()
    }
}

/// Oracle that claims everything fits.
struct Roomy;

impl HeightOracle for Roomy {
    fn set_content(&mut self, _text: &str) {}

    fn client_height(&self) -> f64 {
        1.0
    }

    fn line_height(&self) -> Option<f64> {
        Some(20.0)
    }
}

fn sample(len: usize) -> String {
    "lorem ipsum dolor sit amet "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn two_lines(text: &str) -> ClampOptions {
    ClampOptions {
        lines: 2,
        ..ClampOptions::new(text)
    }
}

#[test]
fn scenario_long_text_default_ellipsis() {
    let text = sample(500);
    let mut node = TenPerPx::new();
    let mut engine = ClampEngine::new();

    let result = engine
        .clamp(&two_lines(&text).request(20.0), Some(&mut node))
        .unwrap();

    assert!(result.is_truncated);
    assert_eq!(result.display_text, format!("{}...", text[..405].trim()));
    assert_eq!(node.content, result.display_text);
}

#[test]
fn scenario_empty_text() {
    let mut node = TenPerPx::new();
    let mut engine = ClampEngine::new();

    let result = engine
        .clamp(&two_lines("").request(20.0), Some(&mut node))
        .unwrap();

    assert!(!result.is_truncated);
    assert_eq!(result.display_text, "");
    assert_eq!(node.calls, 0);
}

#[test]
fn scenario_expanded() {
    let text = sample(500);
    let mut node = TenPerPx::new();
    let mut engine = ClampEngine::new();
    let options = ClampOptions {
        expanded: true,
        ..two_lines(&text)
    };

    let result = engine.clamp(&options.request(20.0), Some(&mut node)).unwrap();

    assert!(!result.is_truncated);
    assert_eq!(result.display_text, text);
    assert_eq!(node.calls, 0);
}

#[test]
fn scenario_everything_fits() {
    let text = sample(500);
    let mut engine = ClampEngine::new();

    let result = engine
        .clamp(&two_lines(&text).request(20.0), Some(&mut Roomy))
        .unwrap();

    assert!(!result.is_truncated);
    assert_eq!(result.display_text, text);
}

#[test]
fn scenario_numeric_ellipsis_zero() {
    let text = sample(500);
    let mut node = TenPerPx::new();
    let options = ClampOptions {
        ellipsis: Ellipsis::Units(0.0),
        ..two_lines(&text)
    };

    let outcome = clamp(&options.request(20.0), Some(&mut node));

    let ClampOutcome::Computed(clamped) = outcome else {
        panic!("expected a computation");
    };
    assert!(clamped.is_truncated);
    assert_eq!(clamped.display_text, text[..410].trim());
}

#[test]
fn scenario_zero_height_node_is_noop() {
    let mut node = TenPerPx::new();
    node.set_content("");
    let mut engine = ClampEngine::new();
    let before = engine.result();

    let outcome = clamp(&two_lines("hello").request(20.0), Some(&mut node));
    assert_eq!(outcome, ClampOutcome::Skipped(SkipReason::NotLaidOut));
    assert!(engine.clamp(&two_lines("hello").request(20.0), Some(&mut node)).is_none());
    assert_eq!(engine.result(), before);
    assert_eq!(engine.version(), Version::INITIAL);
}

#[test]
fn property_idempotent() {
    let text = sample(777);
    let mut node = TenPerPx::new();
    let mut engine = ClampEngine::new();
    let options = two_lines(&text);

    let first = engine.clamp(&options.request(20.0), Some(&mut node)).unwrap();
    let second = engine.clamp(&options.request(20.0), Some(&mut node)).unwrap();

    assert_eq!(first.is_truncated, second.is_truncated);
    assert_eq!(first.display_text, second.display_text);
    assert_ne!(first.version, second.version);
}

#[test]
fn property_more_lines_never_shorter() {
    let text = sample(2000);
    let mut node = TenPerPx::new();
    let mut engine = ClampEngine::new();
    let mut previous = 0;

    for lines in 1..=8 {
        let options = ClampOptions {
            lines,
            ..ClampOptions::new(text.as_str())
        };
        let result = engine.clamp(&options.request(20.0), Some(&mut node)).unwrap();
        let len = grapheme_len(&result.display_text);
        assert!(len >= previous, "{lines} lines gave {len} < {previous}");
        previous = len;
    }
}

#[test]
fn property_marker_and_bounds() {
    let text = sample(600);
    for marker in ["...", "…", " [more]", ""] {
        let mut node = TenPerPx::new();
        let options = ClampOptions {
            ellipsis: Ellipsis::from(marker),
            ..two_lines(&text)
        };
        let ClampOutcome::Computed(clamped) = clamp(&options.request(20.0), Some(&mut node)) else {
            panic!("expected a computation");
        };
        assert!(clamped.is_truncated);
        assert!(clamped.display_text.ends_with(marker));
        assert!(grapheme_len(&clamped.display_text) <= grapheme_len(&text) + grapheme_len(marker));
    }
}

#[test]
fn terminal_box_clamps_to_rows() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
    let mut node = CellTextBox::new(40).with_wrap(WrapMode::Word);
    node.set_content(".");
    let mut engine = ClampEngine::new();
    let options = ClampOptions {
        lines: 3,
        ..ClampOptions::new(text.as_str())
    };

    let line_height = node.line_height().unwrap();
    let result = engine.clamp(&options.request(line_height), Some(&mut node)).unwrap();

    assert!(result.is_truncated);
    assert!(result.display_text.ends_with("..."));
    assert_eq!(node.content(), result.display_text);
    assert!(node.rows() <= 3, "clamped text spans {} rows", node.rows());
}
