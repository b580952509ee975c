use crate::core::{SeriesStore, Viewport};
use crate::host::ChartHost;

use super::{ChartEngine, ChartEngineConfig, ContainerFallback, Pane, SchedulerState};

impl<H: ChartHost> ChartEngine<H> {
    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn series_store(&self) -> &SeriesStore {
        &self.store
    }

    /// Pane size segments are binned against.
    #[must_use]
    pub fn panel_size(&self) -> Viewport {
        self.panel_size
    }

    /// The pane pool in slot order; empty before `init`.
    #[must_use]
    pub fn panes(&self) -> &[Pane<H::Node, H::Surface>] {
        &self.panes
    }

    #[must_use]
    pub fn current_segment(&self) -> Option<usize> {
        self.scheduler.current()
    }

    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Which fallback `init` used, if the requested container was missing.
    #[must_use]
    pub fn container_fallback_used(&self) -> Option<ContainerFallback> {
        self.container_fallback
    }

    /// Segments currently bound to a pane, in slot order.
    #[must_use]
    pub fn materialized_segments(&self) -> Vec<usize> {
        self.panes
            .iter()
            .filter_map(|pane| pane.bound_segment())
            .collect()
    }

    #[must_use]
    pub fn y_axis_surface(&self) -> Option<&H::Surface> {
        self.layout.as_ref().map(|layout| &layout.y_axis.surface)
    }

    /// Number of toolbar controls created by `init`.
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.layout.as_ref().map_or(0, |layout| layout.controls.len())
    }
}
