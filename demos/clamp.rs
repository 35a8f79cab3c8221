//! Clamp text to the terminal width and re-clamp on resize.
//!
//! ```text
//! cargo run --example clamp -- "some long text ..."
//! CLAMP_LINES=2 RUST_LOG=spark_clamp=debug cargo run --example clamp
//! ```
//!
//! Resize the terminal to see the text re-clamped; Ctrl+C to quit.

use spark_clamp::{
    CellTextBox, ClampDriver, ClampError, ClampOptions, ClampResult, ResizeWatcher,
    parse_line_height,
};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "Spark clamps text to a fixed number of lines. It binary-searches the \
longest prefix whose rendered height fits, asks the node to render each candidate, and \
appends an ellipsis to the winner. Resizing the terminal re-runs the search after a short \
debounce, so rapid resizes cost a single computation.";

fn print_result(result: &ClampResult) {
    println!("{}", result.display_text);
    println!("-- {} truncated={}", result.version, result.is_truncated);
}

fn main() -> Result<(), ClampError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        SAMPLE.to_string()
    } else {
        args.join(" ")
    };

    let lines = std::env::var("CLAMP_LINES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);

    let mut node = CellTextBox::from_terminal()?;
    if let Ok(value) = std::env::var("CLAMP_ROW_HEIGHT") {
        node.set_row_height(parse_line_height(&value)?);
    }

    let mut driver = ClampDriver::new(ClampOptions {
        text,
        lines,
        ..Default::default()
    })?;

    if let Some(result) = driver.attach(node) {
        print_result(&result);
    }

    let _watcher = ResizeWatcher::spawn(driver.sender())?;
    driver.run(print_result);
    Ok(())
}
