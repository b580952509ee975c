use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{SegmentState, bin_segment};
use crate::error::{ChartError, ChartResult};
use crate::host::{ChartHost, NodeStyle};
use crate::render::{Polyline, Surface};

use super::pane_pool::slot_for_segment;
use super::{ChartEngine, ChartTask, SegmentPlan};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentRequestOutcome {
    /// The primary series has no points; nothing was planned.
    EmptySeries,
    Planned(SegmentPlan),
}

/// What one `draw_segment` call put on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDrawReport {
    pub segment: usize,
    pub slot: usize,
    pub state: SegmentState,
    pub filled_columns: usize,
    pub polylines: usize,
    pub clipped_points: usize,
    pub x_range: f64,
    pub left_px: f64,
}

impl<H: ChartHost> ChartEngine<H> {
    /// Makes `segment` current: draws it now if needed and queues its
    /// neighbors on the task queue.
    pub fn request_segment(&mut self, segment: usize) -> ChartResult<SegmentRequestOutcome> {
        if self.layout.is_none() {
            return Err(ChartError::NotInitialized);
        }
        if self.store.primary_is_empty() {
            debug!(segment, "segment request ignored: empty series");
            return Ok(SegmentRequestOutcome::EmptySeries);
        }

        let plan = self.scheduler.plan(segment);
        if let Some(immediate) = plan.immediate {
            self.draw_segment(immediate)?;
        }
        let delay = self.config.timing.look_around_delay;
        for &deferred in &plan.deferred {
            self.tasks.schedule(ChartTask::DrawSegment(deferred), delay);
        }
        Ok(SegmentRequestOutcome::Planned(plan))
    }

    /// Bins `segment` into pane `segment % 3`, strokes it, moves the pane to
    /// the segment's offset and refreshes its x tick labels.
    ///
    /// Drawing the same segment again produces the same strokes.
    pub fn draw_segment(&mut self, segment: usize) -> ChartResult<SegmentDrawReport> {
        if self.layout.is_none() {
            return Err(ChartError::NotInitialized);
        }
        let slot = slot_for_segment(segment);
        let series = self.store.get_series(0)?;
        let zoom = self.settings.settings().zoom;
        let binned = bin_segment(
            series,
            segment,
            zoom,
            self.panel_size,
            self.config.segment_indexing,
        );
        let runs = binned.polyline_runs();

        let pane = self
            .panes
            .get_mut(slot)
            .ok_or_else(|| ChartError::NodeNotFound(format!("data_pane_{}", slot + 1)))?;
        if pane.activate() {
            self.host
                .set_style(&pane.nodes().pane, NodeStyle::Visible(true));
        }

        let surface = pane.surface_mut();
        surface.clear()?;
        for run in &runs {
            let polyline = Polyline::new(
                run.clone(),
                self.config.series_stroke_width,
                self.config.series_color,
            );
            surface.draw_polyline(&polyline)?;
        }

        let left_px = f64::from(self.panel_size.width) * segment as f64;
        self.host
            .set_style(&pane.nodes().pane, NodeStyle::Left(left_px));
        pane.bind(segment, left_px);
        self.write_x_tick_labels(slot, segment, binned.x_range);

        let report = SegmentDrawReport {
            segment,
            slot,
            state: binned.state,
            filled_columns: binned.filled_columns(),
            polylines: runs.len(),
            clipped_points: binned.clipped_points,
            x_range: binned.x_range,
            left_px,
        };
        trace!(
            segment,
            slot,
            state = ?report.state,
            filled_columns = report.filled_columns,
            polylines = report.polylines,
            clipped_points = report.clipped_points,
            "segment drawn"
        );
        Ok(report)
    }
}
