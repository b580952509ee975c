use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::ScrollMetrics;
use crate::error::ChartResult;
use crate::host::ChartHost;

use super::{ChartEngine, ChartTask};

/// Throttle lock plus the guard band at the right end of the scroll range.
///
/// The lock is a plain flag released by a timed task, not by draw
/// completion; a scroll landing while it is held is simply skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollController {
    locked: bool,
    guard_band_px: f64,
}

impl ScrollController {
    #[must_use]
    pub fn new(guard_band_px: f64) -> Self {
        Self {
            locked: false,
            guard_band_px,
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether `metrics` is far enough from the right end to be acted on.
    #[must_use]
    pub fn accepts(&self, metrics: ScrollMetrics) -> bool {
        metrics.scroll_x < metrics.max_scroll_x() - self.guard_band_px
    }

    /// Segment under the left edge of the viewport.
    #[must_use]
    pub fn segment_at(metrics: ScrollMetrics, panel_width_px: u32) -> Option<usize> {
        if panel_width_px == 0 {
            return None;
        }
        let segment = (metrics.scroll_x.max(0.0) / f64::from(panel_width_px)).floor();
        segment.is_finite().then_some(segment as usize)
    }

    pub(super) fn lock(&mut self) {
        self.locked = true;
    }

    pub(super) fn release(&mut self) {
        self.locked = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollOutcome {
    /// Not initialized, zero panel width or inside the guard band.
    Ignored,
    /// Still inside the current segment.
    Unchanged(usize),
    /// A segment change arrived while the throttle lock was held.
    Throttled(usize),
    Requested(usize),
}

impl<H: ChartHost> ChartEngine<H> {
    /// Handles a scroll notification from the pane wrapper.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> ChartResult<ScrollOutcome> {
        self.scroll_position = metrics;
        if self.layout.is_none() || !self.scroll.accepts(metrics) {
            return Ok(ScrollOutcome::Ignored);
        }
        let Some(segment) = ScrollController::segment_at(metrics, self.panel_size.width) else {
            return Ok(ScrollOutcome::Ignored);
        };
        if self.scheduler.current() == Some(segment) {
            return Ok(ScrollOutcome::Unchanged(segment));
        }
        if self.scroll.is_locked() {
            trace!(segment, scroll_x = metrics.scroll_x, "scroll throttled");
            return Ok(ScrollOutcome::Throttled(segment));
        }

        self.scroll.lock();
        self.tasks.schedule(
            ChartTask::ReleaseScrollLock,
            self.config.timing.scroll_throttle,
        );
        trace!(segment, scroll_x = metrics.scroll_x, "scroll moved to segment");
        self.request_segment(segment)?;
        Ok(ScrollOutcome::Requested(segment))
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll.is_locked()
    }

    /// Last scroll metrics reported to `on_scroll`.
    #[must_use]
    pub fn scroll_position(&self) -> ScrollMetrics {
        self.scroll_position
    }
}
