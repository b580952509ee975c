use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Series, TickLabel, Viewport, Zoom};

use super::{PaneSnapshot, PlaybackState, ScheduledTask, SchedulerState};

/// Bounds and size of one stored series; the points themselves are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub name: String,
    pub len: usize,
    pub x_bounds: (f64, f64),
    pub y_bounds: (f64, f64),
    pub x_axis_label: String,
}

impl From<&Series> for SeriesSummary {
    fn from(series: &Series) -> Self {
        Self {
            name: series.name().to_owned(),
            len: series.len(),
            x_bounds: series.x_bounds(),
            y_bounds: series.y_bounds(),
            x_axis_label: series.x_axis_label().to_owned(),
        }
    }
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub initialized: bool,
    pub panel_size: Viewport,
    pub reference_width: u32,
    pub zoom: Zoom,
    pub current_segment: Option<usize>,
    pub scheduler_state: SchedulerState,
    pub scroll_locked: bool,
    pub scroll_x: f64,
    pub playback: PlaybackState,
    pub clock: Duration,
    pub panes: Vec<PaneSnapshot>,
    pub y_tick_labels: Vec<TickLabel>,
    pub series: Vec<SeriesSummary>,
    pub pending_tasks: Vec<ScheduledTask>,
}
