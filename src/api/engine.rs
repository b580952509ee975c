use crate::core::{ScrollMetrics, SeriesStore, TickLabel, Viewport};
use crate::host::ChartHost;

use super::layout_builder::ChartLayout;
use super::{
    ChartEngineConfig, ContainerFallback, Pane, PaneScheduler, PlaybackState, ScrollController,
    SettingsStore, TaskQueue,
};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns every piece of per-chart mutable state: the series
/// store, the three-pane pool, the scheduler, the scroll lock and the task
/// queue. Host events (`on_scroll`, `on_resize`, `on_click`) and the task
/// queue are the only drivers; all mutation goes through `&mut self`.
pub struct ChartEngine<H: ChartHost> {
    pub(super) host: H,
    pub(super) config: ChartEngineConfig,
    pub(super) settings: SettingsStore,
    pub(super) store: SeriesStore,
    pub(super) layout: Option<ChartLayout<H::Node, H::Surface>>,
    pub(super) panes: Vec<Pane<H::Node, H::Surface>>,
    pub(super) scheduler: PaneScheduler,
    pub(super) scroll: ScrollController,
    pub(super) playback: PlaybackState,
    pub(super) tasks: TaskQueue,
    /// Size binning and pane placement use; only a major resize changes it.
    pub(super) panel_size: Viewport,
    /// Width the last major resize (or the layout) was based on.
    pub(super) reference_width: u32,
    /// Last size reported by the host, major or not.
    pub(super) measured_size: Viewport,
    pub(super) scroll_position: ScrollMetrics,
    pub(super) container_fallback: Option<ContainerFallback>,
    pub(super) y_tick_labels: Vec<TickLabel>,
}

impl<H: ChartHost> ChartEngine<H> {
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to simulate layout changes in tests.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }
}
