//! Lifecycle driver - when to clamp.
//!
//! The driver owns the measurement node and decides when the engine runs:
//!
//! | Trigger                        | When it clamps                          |
//! |--------------------------------|-----------------------------------------|
//! | first `attach` (mount)         | immediately, if there is text           |
//! | later `attach`                 | immediately                             |
//! | `text` / `expanded` / `char_width` change | immediately, once mounted    |
//! | resize                         | after the debounce delay, if there is text |
//! | `lines` / `ellipsis` change    | never on its own; next computation uses it |
//!
//! Before each computation the line height is re-read from the node. Without a
//! usable line height only empty or expanded text is shown; nothing is measured.

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use spark_signals::Signal;
use tracing::{debug, trace, warn};

use super::debounce::Debouncer;
use super::events::{ClampEvent, EventChannel};
use crate::clamp::ClampEngine;
use crate::error::ClampError;
use crate::measure::{HeightOracle, usable_line_height};
use crate::types::{ClampOptions, ClampResult, Ellipsis, Version};

bitflags::bitflags! {
    /// What caused a computation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Triggers: u8 {
        const MOUNT = 1 << 0;
        const ATTACH = 1 << 1;
        const TEXT = 1 << 2;
        const EXPANDED = 1 << 3;
        const CHAR_WIDTH = 1 << 4;
        const RESIZE = 1 << 5;

        /// Inputs whose change recomputes right away.
        const TRACKED = Self::TEXT.bits() | Self::EXPANDED.bits() | Self::CHAR_WIDTH.bits();
    }
}

pub struct ClampDriver<N: HeightOracle> {
    options: ClampOptions,
    engine: ClampEngine,
    node: Option<N>,
    line_height: Option<f64>,
    mounted: bool,
    stopped: bool,
    resize: Debouncer,
    channel: EventChannel,
}

impl<N: HeightOracle> ClampDriver<N> {
    pub fn new(options: ClampOptions) -> Result<Self, ClampError> {
        options.validate()?;
        let resize = Debouncer::new(Duration::from_millis(options.debounce_time));
        Ok(Self {
            options,
            engine: ClampEngine::new(),
            node: None,
            line_height: None,
            mounted: false,
            stopped: false,
            resize,
            channel: EventChannel::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &ClampOptions {
        &self.options
    }

    pub fn result(&self) -> ClampResult {
        self.engine.result()
    }

    pub fn result_signal(&self) -> Signal<ClampResult> {
        self.engine.result_signal()
    }

    pub fn version(&self) -> Version {
        self.engine.version()
    }

    pub fn node(&self) -> Option<&N> {
        self.node.as_ref()
    }

    /// Line height used by the latest computation.
    pub fn line_height(&self) -> Option<f64> {
        self.line_height
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether a resize computation is waiting on the debounce timer.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// A producer handle for other threads.
    pub fn sender(&self) -> Sender<ClampEvent> {
        self.channel.sender()
    }

    // -------------------------------------------------------------------------
    // Node lifecycle
    // -------------------------------------------------------------------------

    /// Attach the measurement node.
    ///
    /// The node first renders the current result, as the host would (the
    /// placeholder before any computation). The first attach then mounts the
    /// driver and clamps if there is text; a node attached after that is
    /// clamped straight away.
    pub fn attach(&mut self, mut node: N) -> Option<ClampResult> {
        node.set_content(&self.engine.result().display_text);
        self.node = Some(node);

        if self.mounted {
            return self.recompute(Triggers::ATTACH);
        }

        self.mounted = true;
        if self.options.text.is_empty() {
            return None;
        }
        self.recompute(Triggers::MOUNT)
    }

    /// Take the node back. Computations are skipped until a node is attached.
    pub fn detach(&mut self) -> Option<N> {
        self.node.take()
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    pub fn set_text(&mut self, text: impl Into<String>) -> Option<ClampResult> {
        let triggers = self.replace_text(text.into());
        self.inputs_changed(triggers)
    }

    pub fn set_expanded(&mut self, expanded: bool) -> Option<ClampResult> {
        let triggers = self.replace_expanded(expanded);
        self.inputs_changed(triggers)
    }

    pub fn set_char_width(&mut self, char_width: f64) -> Result<Option<ClampResult>, ClampError> {
        let triggers = self.replace_char_width(char_width)?;
        Ok(self.inputs_changed(triggers))
    }

    /// Change the line budget. Takes effect on the next computation.
    pub fn set_lines(&mut self, lines: u32) -> Result<(), ClampError> {
        let candidate = ClampOptions {
            lines,
            ..self.options.clone()
        };
        candidate.validate()?;
        self.options.lines = lines;
        Ok(())
    }

    /// Change the ellipsis. Takes effect on the next computation.
    pub fn set_ellipsis(&mut self, ellipsis: impl Into<Ellipsis>) {
        self.options.ellipsis = ellipsis.into();
    }

    /// Change the resize debounce delay.
    pub fn set_debounce_time(&mut self, millis: u64) {
        self.options.debounce_time = millis;
        self.resize.set_delay(Duration::from_millis(millis));
    }

    /// The host surface resized at `now`. The clamp runs from [`poll`](Self::poll)
    /// once the debounce delay has passed without another resize.
    pub fn resize(&mut self, cols: u16, rows: u16, now: Instant) {
        if let Some(node) = self.node.as_mut() {
            node.host_resized(cols, rows);
        }
        self.resize.schedule(now);
    }

    /// Run the debounced resize computation if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<ClampResult> {
        if !self.resize.fire(now) {
            return None;
        }
        if self.options.text.is_empty() {
            trace!("resize with empty text, nothing to clamp");
            return None;
        }
        self.recompute(Triggers::RESIZE)
    }

    // -------------------------------------------------------------------------
    // Event loop
    // -------------------------------------------------------------------------

    /// Drain queued events, then run whatever they triggered.
    ///
    /// Tracked input changes in one batch share a single computation.
    pub fn pump(&mut self, now: Instant) -> Option<ClampResult> {
        let mut triggers = Triggers::empty();
        while let Some(event) = self.channel.try_recv() {
            triggers |= self.handle(event, now);
        }
        self.flush(triggers, now)
    }

    /// Block on the event channel until [`ClampEvent::Stop`], calling
    /// `on_result` after every computation.
    pub fn run(&mut self, mut on_result: impl FnMut(&ClampResult)) {
        while !self.stopped {
            let event = match self.resize.deadline() {
                Some(deadline) => self
                    .channel
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self.channel.recv(),
            };

            let now = Instant::now();
            let mut triggers = Triggers::empty();
            if let Some(event) = event {
                triggers |= self.handle(event, now);
            }
            while let Some(event) = self.channel.try_recv() {
                triggers |= self.handle(event, now);
            }

            if let Some(result) = self.flush(triggers, now) {
                on_result(&result);
            }
        }
    }

    fn handle(&mut self, event: ClampEvent, now: Instant) -> Triggers {
        trace!(?event, "clamp event");
        match event {
            ClampEvent::Resized { cols, rows } => {
                self.resize(cols, rows, now);
                Triggers::empty()
            }
            ClampEvent::Text(text) => self.replace_text(text),
            ClampEvent::Expanded(expanded) => self.replace_expanded(expanded),
            ClampEvent::CharWidth(char_width) => {
                self.replace_char_width(char_width).unwrap_or_else(|err| {
                    warn!(error = %err, "ignoring char width event");
                    Triggers::empty()
                })
            }
            ClampEvent::Lines(lines) => {
                if let Err(err) = self.set_lines(lines) {
                    warn!(error = %err, "ignoring line budget event");
                }
                Triggers::empty()
            }
            ClampEvent::Ellipsis(ellipsis) => {
                self.set_ellipsis(ellipsis);
                Triggers::empty()
            }
            ClampEvent::Stop => {
                self.stopped = true;
                self.resize.cancel();
                Triggers::empty()
            }
        }
    }

    fn flush(&mut self, triggers: Triggers, now: Instant) -> Option<ClampResult> {
        let changed = self.inputs_changed(triggers);
        self.poll(now).or(changed)
    }

    // -------------------------------------------------------------------------
    // Computation
    // -------------------------------------------------------------------------

    fn replace_text(&mut self, text: String) -> Triggers {
        if text == self.options.text {
            return Triggers::empty();
        }
        self.options.text = text;
        Triggers::TEXT
    }

    fn replace_expanded(&mut self, expanded: bool) -> Triggers {
        if expanded == self.options.expanded {
            return Triggers::empty();
        }
        self.options.expanded = expanded;
        Triggers::EXPANDED
    }

    fn replace_char_width(&mut self, char_width: f64) -> Result<Triggers, ClampError> {
        if char_width == self.options.char_width {
            return Ok(Triggers::empty());
        }
        let candidate = ClampOptions {
            char_width,
            ..self.options.clone()
        };
        candidate.validate()?;
        self.options.char_width = char_width;
        Ok(Triggers::CHAR_WIDTH)
    }

    fn inputs_changed(&mut self, triggers: Triggers) -> Option<ClampResult> {
        let tracked = triggers & Triggers::TRACKED;
        if tracked.is_empty() || !self.mounted {
            return None;
        }
        self.recompute(tracked)
    }

    fn recompute(&mut self, cause: Triggers) -> Option<ClampResult> {
        if let Some(node) = self.node.as_ref() {
            self.line_height = usable_line_height(node);
        }

        // Empty or expanded text is shown in full without measuring, except
        // on resize, which always needs a line height
        let unmeasured = !cause.contains(Triggers::RESIZE)
            && (self.options.text.is_empty() || self.options.expanded);
        let line_height = match self.line_height {
            Some(line_height) => line_height,
            None if unmeasured => 0.0,
            None => {
                trace!(?cause, "line height unknown, not clamping");
                return None;
            }
        };

        debug!(?cause, line_height, "recomputing clamp");
        let request = self.options.request(line_height);
        self.engine.clamp(&request, self.node.as_mut())
    }
}
