use crate::error::{ChartError, ChartResult};
use crate::host::ChartHost;

use super::{ChartEngine, EngineSnapshot, PaneSnapshot, SeriesSummary};

impl<H: ChartHost> ChartEngine<H> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            initialized: self.layout.is_some(),
            panel_size: self.panel_size,
            reference_width: self.reference_width,
            zoom: self.settings.settings().zoom,
            current_segment: self.scheduler.current(),
            scheduler_state: self.scheduler.state(),
            scroll_locked: self.scroll.is_locked(),
            scroll_x: self.scroll_position.scroll_x,
            playback: self.playback,
            clock: self.tasks.now(),
            panes: self.panes.iter().map(PaneSnapshot::from).collect(),
            y_tick_labels: self.y_tick_labels.clone(),
            series: self.store.series().iter().map(SeriesSummary::from).collect(),
            pending_tasks: self.tasks.pending(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
