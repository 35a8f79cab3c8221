//! Result state for one clamped text.
//!
//! The engine owns its own version counter and publishes every computation
//! through a reactive signal. Results are replaced wholesale, so an effect
//! reading the signal re-runs on every computation, including ones that
//! produce the same text.

use spark_signals::{Signal, signal};
use tracing::{debug, trace};

use super::search::{self, ClampOutcome};
use crate::measure::HeightOracle;
use crate::types::{ClampRequest, ClampResult, Version};

pub struct ClampEngine {
    state: Signal<ClampResult>,
    version: Version,
}

impl ClampEngine {
    /// Engine showing the placeholder result.
    pub fn new() -> Self {
        Self {
            state: signal(ClampResult::placeholder()),
            version: Version::INITIAL,
        }
    }

    /// Latest result (reactive read).
    pub fn result(&self) -> ClampResult {
        self.state.get()
    }

    /// The result signal, for effects and deriveds.
    pub fn result_signal(&self) -> Signal<ClampResult> {
        self.state.clone()
    }

    /// Version of the latest result.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Run one computation and publish it.
    ///
    /// Returns `None` when the computation was skipped; the previous result
    /// stays in place.
    pub fn clamp<N>(
        &mut self,
        request: &ClampRequest<'_>,
        node: Option<&mut N>,
    ) -> Option<ClampResult>
    where
        N: HeightOracle + ?Sized,
    {
        let clamped = match search::clamp(request, node) {
            ClampOutcome::Computed(clamped) => clamped,
            ClampOutcome::Skipped(reason) => {
                trace!(?reason, "clamp skipped");
                return None;
            }
        };

        self.version = self.version.next();
        let result = ClampResult {
            is_truncated: clamped.is_truncated,
            display_text: clamped.display_text,
            version: self.version,
        };

        debug!(
            version = %result.version,
            truncated = result.is_truncated,
            probes = clamped.probes,
            "clamp computed"
        );
        self.state.set(result.clone());
        Some(result)
    }
}

impl Default for ClampEngine {
    fn default() -> Self {
        Self::new()
    }
}
