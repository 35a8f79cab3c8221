//! Driver lifecycle against the terminal cell box.

use std::thread;
use std::time::{Duration, Instant};

use spark_clamp::{CellTextBox, ClampDriver, ClampEvent, ClampOptions, Version};

fn paragraph() -> String {
    "The quick brown fox jumps over the lazy dog. ".repeat(4)
}

fn driver() -> ClampDriver<CellTextBox> {
    ClampDriver::new(ClampOptions {
        text: paragraph(),
        lines: 2,
        debounce_time: 300,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn resize_reclamps_after_debounce() {
    let mut driver = driver();
    let mounted = driver.attach(CellTextBox::new(30).following_host()).unwrap();
    assert!(mounted.is_truncated);

    let t0 = Instant::now();
    driver.resize(200, 50, t0);
    assert_eq!(driver.node().unwrap().width(), 200);
    assert!(driver.poll(t0 + Duration::from_millis(100)).is_none());

    let wide = driver.poll(t0 + Duration::from_millis(300)).unwrap();
    assert!(!wide.is_truncated);
    assert_eq!(wide.display_text, paragraph());

    driver.resize(30, 50, t0 + Duration::from_secs(1));
    let narrow = driver.poll(t0 + Duration::from_secs(2)).unwrap();
    assert_eq!(narrow.display_text, mounted.display_text);
    assert!(narrow.version > wide.version);
}

#[test]
fn expanding_shows_everything() {
    let mut driver = driver();
    driver.attach(CellTextBox::new(30));

    let expanded = driver.set_expanded(true).unwrap();
    assert!(!expanded.is_truncated);
    assert_eq!(expanded.display_text, paragraph());
}

#[test]
fn hidden_box_is_left_alone() {
    let mut driver = driver();
    assert!(driver.attach(CellTextBox::new(0)).is_none());
    assert_eq!(driver.result().version, Version::INITIAL);
    assert_eq!(driver.result().display_text, ".");
}

#[test]
fn events_from_another_thread() {
    let mut driver = driver();
    driver.attach(CellTextBox::new(30));

    let tx = driver.sender();
    thread::spawn(move || {
        tx.send(ClampEvent::Text("short".to_string())).unwrap();
        tx.send(ClampEvent::Stop).unwrap();
    })
    .join()
    .unwrap();

    let mut results = Vec::new();
    driver.run(|result| results.push(result.clone()));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].display_text, "short");
    assert!(!results[0].is_truncated);
}

#[test]
fn result_signal_tracks_driver() {
    let mut driver = driver();
    let signal = driver.result_signal();
    let mounted = driver.attach(CellTextBox::new(30)).unwrap();
    assert_eq!(signal.get(), mounted);
}
